use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use expense_tracker::client::{
    Action, AddExpenseForm, ApiClientConfig, DEFAULT_BASE_URL, Dashboard, DashboardState,
    FilterForm, HttpExpenseApi, format_currency, render_category_table, render_expense_table,
};

/// A terminal front end for the expense tracker.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Where the expense API is served from.
    #[arg(long, env = "EXPENSES_API_URL", default_value = DEFAULT_BASE_URL)]
    base_url: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List expenses, optionally filtered by category and date.
    List {
        /// Only list this category.
        #[arg(long)]
        category: Option<String>,
        /// Only list this date, as YYYY-MM-DD.
        #[arg(long)]
        date: Option<String>,
    },
    /// Add an expense and list all expenses.
    Add {
        /// How much was spent.
        #[arg(long, allow_hyphen_values = true)]
        amount: String,
        /// One of Food, Transportation, Entertainment, Shopping, Bills,
        /// Healthcare, Education or Other.
        #[arg(long)]
        category: String,
        /// When the money was spent, as YYYY-MM-DD.
        #[arg(long)]
        date: String,
        /// An optional note.
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Show the total spent from START to END inclusive.
    Total {
        /// The first date, as YYYY-MM-DD.
        #[arg(long)]
        start: String,
        /// The last date, as YYYY-MM-DD.
        #[arg(long)]
        end: String,
    },
    /// Show the total and number of expenses in each category.
    ByCategory,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    // Keep stdout for the tables.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = match HttpExpenseApi::new(ApiClientConfig {
        base_url: args.base_url,
    }) {
        Ok(api) => api,
        Err(error) => {
            eprintln!("{error}");
            return ExitCode::FAILURE;
        }
    };
    let dashboard = Dashboard::new(api);

    match args.command {
        Command::List { category, date } => {
            if category.is_none() && date.is_none() {
                dashboard.load().await;
            } else {
                dashboard.dispatch(Action::EditFilterForm(FilterForm {
                    category: category.unwrap_or_default(),
                    date: date.unwrap_or_default(),
                    ..Default::default()
                }));
                dashboard.apply_filter().await;
            }

            finish(dashboard.state(), |state| {
                render_expense_table(&state.visible, state.total)
            })
        }
        Command::Add {
            amount,
            category,
            date,
            description,
        } => {
            dashboard.dispatch(Action::EditAddForm(AddExpenseForm {
                amount,
                category,
                date,
                description,
            }));
            dashboard.add().await;

            finish(dashboard.state(), |state| {
                render_expense_table(&state.visible, state.total)
            })
        }
        Command::Total { start, end } => {
            dashboard.dispatch(Action::EditFilterForm(FilterForm {
                start,
                end,
                ..Default::default()
            }));
            dashboard.compute_range_total().await;

            finish(dashboard.state(), |state| {
                format!("Total: {}\n", format_currency(state.total))
            })
        }
        Command::ByCategory => match dashboard.category_breakdown().await {
            Ok(totals) => {
                print!("{}", render_category_table(&totals));
                ExitCode::SUCCESS
            }
            Err(error) => {
                eprintln!("{error}");
                ExitCode::FAILURE
            }
        },
    }
}

/// Print the state's error, or render the state if there is none.
fn finish(state: DashboardState, render: impl FnOnce(&DashboardState) -> String) -> ExitCode {
    match &state.error {
        Some(message) => {
            eprintln!("Error: {message}");
            ExitCode::FAILURE
        }
        None => {
            print!("{}", render(&state));
            ExitCode::SUCCESS
        }
    }
}
