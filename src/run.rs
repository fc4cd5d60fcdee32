use crate::cli;
use crate::github::pull;
use crate::output;
use anyhow::Context;

pub async fn run(
    args: Vec<String>,
    mut stdout_additional: Option<&mut dyn std::io::Write>,
) -> anyhow::Result<()> {
    match cli::parser::parse_args(&args) {
        cli::parser::Command::Fetch(fetch) => {
            let records = pull::fetch_filtered(
                &fetch.config_path,
                &fetch.owner,
                &fetch.repo,
                &fetch.start_date,
                &fetch.end_date,
            )
            .await
            .with_context(|| {
                format!(
                    "Failed to fetch pull requests for {}/{}",
                    fetch.owner, fetch.repo
                )
            })?;

            let formatted =
                output::format_records(&records).context("Failed to format pull requests")?;
            output::println(&formatted, &mut stdout_additional)?;
        }
        cli::parser::Command::Help => {
            output::println(cli::parser::USAGE, &mut stdout_additional)?;
        }
        cli::parser::Command::Unknown(message) => {
            return Err(anyhow::anyhow!("{message}\n\n{}", cli::parser::USAGE));
        }
    }
    Ok(())
}
