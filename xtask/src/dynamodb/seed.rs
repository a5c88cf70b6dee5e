//! Seed command implementation.

use chrono::NaiveDate;
use customers_core::customer::Customer;
use customers_core::storage::CustomerRepository;

use super::error::Result;

const FIRST_NAMES: [&str; 8] = [
    "Ada", "Grace", "Linus", "Barbara", "Ken", "Margaret", "Dennis", "Frances",
];
const LAST_NAMES: [&str; 8] = [
    "Lovelace", "Hopper", "Torvalds", "Liskov", "Thompson", "Hamilton", "Ritchie", "Allen",
];
const PLANS: [&str; 3] = ["free", "pro", "enterprise"];

/// Generate demo customers with distinct emails.
///
/// Names cycle through fixed lists; the index is appended to the email and
/// username so any count stays unique.
pub fn generate_seed_customers(count: u32) -> Vec<Customer> {
    (0..count)
        .map(|i| {
            let idx = i as usize;
            let first = FIRST_NAMES[idx % FIRST_NAMES.len()];
            let last = LAST_NAMES[(idx / FIRST_NAMES.len() + idx) % LAST_NAMES.len()];

            let mut customer = Customer::new(
                format!("{}.{}+{}@example.com", first, last, i).to_lowercase(),
                format!("{} {}", first, last),
                format!("{}{}{}", first, last, i).to_lowercase(),
            )
            .with_profile_field("Plan", PLANS[idx % PLANS.len()]);

            // Leave some birthdays out so optional attributes are represented.
            if i % 4 != 3 {
                let year = 1960 + (i % 40) as i32;
                let month = 1 + i % 12;
                let day = 1 + i % 28;
                if let Some(date) = NaiveDate::from_ymd_opt(year, month, day) {
                    customer = customer.with_date_of_birth(date);
                }
            }
            customer
        })
        .collect()
}

/// Insert customers through the repository. Returns the number inserted.
pub async fn seed_customers(
    repository: &impl CustomerRepository,
    customers: &[Customer],
) -> Result<usize> {
    for customer in customers {
        repository.create(customer).await?;
    }
    Ok(customers.len())
}
