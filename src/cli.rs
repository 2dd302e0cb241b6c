use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "vista")]
#[command(about = "Per-workspace issue view options and filters")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// On/off switch for boolean settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Switch {
    On,
    Off,
}

impl Switch {
    pub fn is_on(self) -> bool {
        self == Switch::On
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the stored view preferences for a workspace
    #[command(visible_alias = "s")]
    Show {
        /// Workspace slug
        workspace: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// List the options presented for the workspace's current view
    #[command(visible_alias = "o")]
    Options {
        /// Workspace slug
        workspace: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Switch the view type: list, kanban, calendar, spreadsheet, gantt
    View {
        /// Workspace slug
        workspace: String,

        /// View type
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the grouping key (e.g. state_detail.group, priority, labels, none)
    GroupBy {
        /// Workspace slug
        workspace: String,

        /// Grouping key
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the ordering key (e.g. -created_at, -updated_at, start_date, priority)
    OrderBy {
        /// Workspace slug
        workspace: String,

        /// Ordering key
        #[arg(allow_hyphen_values = true)]
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the issue type filter: all, active, backlog
    IssueType {
        /// Workspace slug
        workspace: String,

        /// Issue type
        value: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show or hide empty groups
    EmptyGroups {
        /// Workspace slug
        workspace: String,

        /// Whether empty groups are shown
        #[arg(value_enum)]
        value: Switch,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Toggle the visibility of a display property
    Property {
        /// Workspace slug
        workspace: String,

        /// Property name (e.g. assignee, due_date, key, estimate)
        name: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Select a filter value. Multi-select keys toggle each value; date keys
    /// take a set of YYYY-MM-DD;after|before entries
    #[command(visible_alias = "f")]
    Filter {
        /// Workspace slug
        workspace: String,

        /// Filter key (type, priority, state, state_group, assignees,
        /// created_by, labels, subscriber, start_date, target_date)
        key: String,

        /// One or more values
        #[arg(required = true, num_args = 1..)]
        values: Vec<String>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reset every filter of a workspace
    ClearFilters {
        /// Workspace slug
        workspace: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the issue list query string for a workspace
    #[command(visible_alias = "q")]
    Query {
        /// Workspace slug
        workspace: String,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Turn the estimate feature on or off for a workspace
    Estimates {
        /// Workspace slug
        workspace: String,

        /// Whether estimates are active
        #[arg(value_enum)]
        value: Switch,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_order_by_accepts_leading_hyphen() {
        let cli = Cli::try_parse_from(["vista", "order-by", "acme", "-updated_at"]).unwrap();
        match cli.command {
            Commands::OrderBy { value, .. } => assert_eq!(value, "-updated_at"),
            _ => panic!("expected order-by"),
        }
    }

    #[test]
    fn test_filter_collects_values() {
        let cli = Cli::try_parse_from([
            "vista",
            "filter",
            "acme",
            "start_date",
            "2023-01-01;after",
            "2023-02-01;before",
        ])
        .unwrap();
        match cli.command {
            Commands::Filter { key, values, .. } => {
                assert_eq!(key, "start_date");
                assert_eq!(values.len(), 2);
            }
            _ => panic!("expected filter"),
        }
    }

    #[test]
    fn test_empty_groups_rejects_other_values() {
        assert!(Cli::try_parse_from(["vista", "empty-groups", "acme", "maybe"]).is_err());
    }
}
