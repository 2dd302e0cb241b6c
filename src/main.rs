use clap::Parser;
use std::process::ExitCode;

use vista::cli::{Cli, Commands};
use vista::commands::{
    cmd_clear_filters, cmd_empty_groups, cmd_estimates, cmd_filter, cmd_group_by, cmd_issue_type,
    cmd_options, cmd_order_by, cmd_property, cmd_query, cmd_show, cmd_view,
};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Show { workspace, json } => cmd_show(&workspace, json).await,
        Commands::Options { workspace, json } => cmd_options(&workspace, json).await,
        Commands::Query { workspace, json } => cmd_query(&workspace, json).await,

        Commands::View {
            workspace,
            value,
            json,
        } => cmd_view(&workspace, &value, json).await,
        Commands::GroupBy {
            workspace,
            value,
            json,
        } => cmd_group_by(&workspace, &value, json).await,
        Commands::OrderBy {
            workspace,
            value,
            json,
        } => cmd_order_by(&workspace, &value, json).await,
        Commands::IssueType {
            workspace,
            value,
            json,
        } => cmd_issue_type(&workspace, &value, json).await,
        Commands::EmptyGroups {
            workspace,
            value,
            json,
        } => cmd_empty_groups(&workspace, value.is_on(), json).await,
        Commands::Property {
            workspace,
            name,
            json,
        } => cmd_property(&workspace, &name, json).await,

        Commands::Filter {
            workspace,
            key,
            values,
            json,
        } => cmd_filter(&workspace, &key, &values, json).await,
        Commands::ClearFilters { workspace, json } => cmd_clear_filters(&workspace, json).await,

        Commands::Estimates {
            workspace,
            value,
            json,
        } => cmd_estimates(&workspace, value.is_on(), json).await,
    };

    match result {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
