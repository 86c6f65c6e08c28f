use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let matches = staffdesk_cli::command().get_matches();
    let config = staffdesk_cli::load_config(&matches)?;
    staffdesk_cli::logging::init(&config.logging);

    let stdout = std::io::stdout();
    let passed = staffdesk_cli::execute(&matches, &config, &mut stdout.lock())?;
    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
