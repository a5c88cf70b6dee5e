//! Pure functions for calculating deployment plans (Functional Core).

use super::config::{GsiConfig, KeyAttribute, TableConfig};

/// Represents the current state of a table.
#[derive(Debug, Clone)]
pub struct TableState {
    pub status: TableStatus,
    pub partition_key: Option<String>,
    pub sort_key: Option<String>,
    pub gsis: Vec<GsiState>,
}

/// Table status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

/// GSI state.
#[derive(Debug, Clone)]
pub struct GsiState {
    pub name: String,
    pub status: GsiStatus,
    pub partition_key: Option<String>,
    pub sort_key: Option<String>,
}

/// GSI status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GsiStatus {
    Active,
    Creating,
    Updating,
    Deleting,
}

impl TableState {
    /// True once the table and all of its indexes accept traffic.
    pub fn is_ready(&self) -> bool {
        self.status == TableStatus::Active && self.gsis.iter().all(|g| g.status == GsiStatus::Active)
    }
}

/// Planned changes for deployment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeployPlan {
    /// Table doesn't exist, needs to be created.
    CreateTable { config: TableConfig },
    /// Table exists, GSIs need to be added.
    AddGsis {
        table_name: String,
        gsis_to_add: Vec<GsiConfig>,
    },
    /// Table exists with keys that can't be changed without recreating it.
    Incompatible {
        table_name: String,
        problems: Vec<String>,
    },
    /// Table is up to date, no changes needed.
    NoChanges { table_name: String },
}

/// Plan for destroying a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DestroyPlan {
    /// Table exists and will be deleted.
    DeleteTable { table_name: String },
    /// Table doesn't exist, nothing to do.
    AlreadyGone { table_name: String },
}

fn key_problem(
    what: &str,
    actual: Option<&str>,
    desired: Option<&KeyAttribute>,
) -> Option<String> {
    let desired = desired.map(|k| k.name.as_str());
    (actual != desired).then(|| {
        format!(
            "! {} is {}, expected {}",
            what,
            actual.unwrap_or("<none>"),
            desired.unwrap_or("<none>")
        )
    })
}

/// Pure function: Calculate what changes are needed to reach desired state.
pub fn calculate_deploy_plan(current: Option<&TableState>, desired: &TableConfig) -> DeployPlan {
    let Some(state) = current else {
        return DeployPlan::CreateTable {
            config: desired.clone(),
        };
    };

    let mut problems: Vec<String> = [
        key_problem(
            "Partition key",
            state.partition_key.as_deref(),
            Some(&desired.partition_key),
        ),
        key_problem("Sort key", state.sort_key.as_deref(), desired.sort_key.as_ref()),
    ]
    .into_iter()
    .flatten()
    .collect();

    let mut gsis_to_add = Vec::new();
    for gsi in &desired.gsis {
        match state.gsis.iter().find(|g| g.name == gsi.name) {
            None => gsis_to_add.push(gsi.clone()),
            Some(existing) => problems.extend(
                [
                    key_problem(
                        &format!("GSI {} partition key", gsi.name),
                        existing.partition_key.as_deref(),
                        Some(&gsi.partition_key),
                    ),
                    key_problem(
                        &format!("GSI {} sort key", gsi.name),
                        existing.sort_key.as_deref(),
                        gsi.sort_key.as_ref(),
                    ),
                ]
                .into_iter()
                .flatten(),
            ),
        }
    }

    let table_name = desired.table_name.clone();
    if !problems.is_empty() {
        DeployPlan::Incompatible {
            table_name,
            problems,
        }
    } else if gsis_to_add.is_empty() {
        DeployPlan::NoChanges { table_name }
    } else {
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        }
    }
}

/// Pure function: Calculate destroy plan.
pub fn calculate_destroy_plan(current: Option<&TableState>, table_name: &str) -> DestroyPlan {
    match current {
        Some(_) => DestroyPlan::DeleteTable {
            table_name: table_name.to_string(),
        },
        None => DestroyPlan::AlreadyGone {
            table_name: table_name.to_string(),
        },
    }
}

fn format_gsi(lines: &mut Vec<String>, prefix: &str, gsi: &GsiConfig) {
    lines.push(format!("{}GSI: {} (projection ALL)", prefix, gsi.name));
    lines.push(format!("    Partition key: {} (S)", gsi.partition_key.name));
    if let Some(sk) = &gsi.sort_key {
        lines.push(format!("    Sort key: {} (S)", sk.name));
    }
}

/// Pure function: Format a deploy plan for display.
pub fn format_deploy_plan(plan: &DeployPlan) -> Vec<String> {
    match plan {
        DeployPlan::CreateTable { config } => {
            let mut lines = vec![
                format!("+ Create table: {}", config.table_name),
                format!("  Partition key: {} (S)", config.partition_key.name),
            ];
            if let Some(sk) = &config.sort_key {
                lines.push(format!("  Sort key: {} (S)", sk.name));
            }
            for gsi in &config.gsis {
                format_gsi(&mut lines, "  + ", gsi);
            }
            lines.push("  Billing: PAY_PER_REQUEST".to_string());
            lines
        }
        DeployPlan::AddGsis {
            table_name,
            gsis_to_add,
        } => {
            let mut lines = vec![format!("~ Update table: {}", table_name)];
            for gsi in gsis_to_add {
                format_gsi(&mut lines, "  + Add ", gsi);
            }
            lines
        }
        DeployPlan::Incompatible {
            table_name,
            problems,
        } => {
            let mut lines = vec![format!("! Table '{}' has an incompatible schema", table_name)];
            lines.extend(problems.iter().map(|p| format!("  {}", p)));
            lines
        }
        DeployPlan::NoChanges { table_name } => {
            vec![format!("= Table '{}' is up to date", table_name)]
        }
    }
}

/// Pure function: Format a destroy plan for display.
pub fn format_destroy_plan(plan: &DestroyPlan) -> Vec<String> {
    match plan {
        DestroyPlan::DeleteTable { table_name } => {
            vec![format!(
                "- Delete table: {} (ALL DATA WILL BE LOST)",
                table_name
            )]
        }
        DestroyPlan::AlreadyGone { table_name } => {
            vec![format!("= Table '{}' does not exist", table_name)]
        }
    }
}

#[cfg(test)]
mod tests {
    use super::super::config::customers_table_config;
    use super::*;

    fn active_table(gsis: Vec<GsiState>) -> TableState {
        TableState {
            status: TableStatus::Active,
            partition_key: Some("pk".to_string()),
            sort_key: Some("sk".to_string()),
            gsis,
        }
    }

    fn email_index(partition_key: &str) -> GsiState {
        GsiState {
            name: "Email-id-index".to_string(),
            status: GsiStatus::Active,
            partition_key: Some(partition_key.to_string()),
            sort_key: Some("Id".to_string()),
        }
    }

    #[test]
    fn test_missing_table_is_created() {
        let config = customers_table_config();
        let plan = calculate_deploy_plan(None, &config);

        assert_eq!(plan, DeployPlan::CreateTable { config });
    }

    #[test]
    fn test_missing_gsi_is_added() {
        let config = customers_table_config();
        let state = active_table(vec![]);

        match calculate_deploy_plan(Some(&state), &config) {
            DeployPlan::AddGsis { gsis_to_add, .. } => {
                assert_eq!(gsis_to_add.len(), 1);
                assert_eq!(gsis_to_add[0].name, "Email-id-index");
            }
            other => panic!("expected AddGsis, got {:?}", other),
        }
    }

    #[test]
    fn test_matching_table_has_no_changes() {
        let state = active_table(vec![email_index("Email")]);
        let plan = calculate_deploy_plan(Some(&state), &customers_table_config());

        assert!(matches!(plan, DeployPlan::NoChanges { .. }));
    }

    #[test]
    fn test_different_table_keys_are_incompatible() {
        let mut state = active_table(vec![email_index("Email")]);
        state.partition_key = Some("PK".to_string());
        state.sort_key = None;

        match calculate_deploy_plan(Some(&state), &customers_table_config()) {
            DeployPlan::Incompatible { problems, .. } => {
                assert_eq!(
                    problems,
                    vec![
                        "! Partition key is PK, expected pk".to_string(),
                        "! Sort key is <none>, expected sk".to_string(),
                    ]
                );
            }
            other => panic!("expected Incompatible, got {:?}", other),
        }
    }

    #[test]
    fn test_different_gsi_keys_are_incompatible() {
        let state = active_table(vec![email_index("email")]);
        let plan = calculate_deploy_plan(Some(&state), &customers_table_config());

        assert!(matches!(plan, DeployPlan::Incompatible { .. }));
    }

    #[test]
    fn test_table_not_ready_while_gsi_builds() {
        let mut gsi = email_index("Email");
        gsi.status = GsiStatus::Creating;
        assert!(!active_table(vec![gsi]).is_ready());
        assert!(active_table(vec![email_index("Email")]).is_ready());
    }

    #[test]
    fn test_destroy_plan() {
        let state = active_table(vec![]);
        assert_eq!(
            calculate_destroy_plan(Some(&state), "customers"),
            DestroyPlan::DeleteTable {
                table_name: "customers".to_string()
            }
        );
        assert_eq!(
            calculate_destroy_plan(None, "customers"),
            DestroyPlan::AlreadyGone {
                table_name: "customers".to_string()
            }
        );
    }

    #[test]
    fn test_format_create_plan() {
        let lines = format_deploy_plan(&DeployPlan::CreateTable {
            config: customers_table_config(),
        });

        assert_eq!(lines[0], "+ Create table: customers");
        assert!(lines.contains(&"  + GSI: Email-id-index (projection ALL)".to_string()));
        assert_eq!(lines.last().unwrap(), "  Billing: PAY_PER_REQUEST");
    }
}
