//! Lists roles from a running service as a paged table.
//!
//! Run with: cargo run --example list_roles -- [filter]
//!
//! Requires .env file with:
//! - SYSPROMPT_API_URL
//!
//! Optional: SYSPROMPT_USER, SYSPROMPT_TIMEOUT_MS, SYSPROMPT_PAGE_SIZE
//!
//! Logs go to list_roles.log.

use std::env;
use std::fs::File;
use std::sync::Arc;

use simplelog::LevelFilter;
use simplelog::WriteLogger;
use sysprompt_lib::Config;
use sysprompt_lib::RoleClient;
use sysprompt_lib::RolePage;
use sysprompt_lib::table::Cell;
use sysprompt_lib::table::ColumnId;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let log_file = File::create("list_roles.log")?;
    WriteLogger::init(LevelFilter::Debug, simplelog::Config::default(), log_file)?;

    let config = Config::from_env()?;
    let client = RoleClient::from_config(&config)?;

    println!("Fetching roles from {}...\n", client.base_url());

    let mut page = RolePage::new(Arc::new(client), &config);
    page.load().await?;

    if let Some(filter) = env::args().nth(1) {
        page.set_filter(filter);
    }
    page.toggle_sort(ColumnId::Name);

    let view = page.table();
    if let Some(message) = view.empty_message() {
        println!("{}", message);
        return Ok(());
    }

    for row in &view.rows {
        let cells: Vec<String> = row
            .cells
            .iter()
            .filter_map(|cell| match cell {
                Cell::Text { text, detail } => Some(match detail {
                    Some(id) => format!("{} (#{})", text, id),
                    None => text.clone(),
                }),
                Cell::Truncated { display, .. } => Some(display.clone()),
                _ => None,
            })
            .collect();
        println!("{}", cells.join(" | "));
    }

    println!(
        "\nPage {} of {} ({} roles)",
        view.page.index + 1,
        view.page_count,
        view.filtered_total
    );

    Ok(())
}
