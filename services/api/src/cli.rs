use crate::server;
use clap::{Args, Parser, Subcommand};
use project_eval::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Project Evaluation Service",
    about = "Score project intake submissions over HTTP",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serve_is_optional_and_accepts_overrides() {
        let cli = Cli::try_parse_from(["project-eval-api"]).expect("bare invocation parses");
        assert!(cli.command.is_none());

        let cli = Cli::try_parse_from(["project-eval-api", "serve", "--port", "8080"])
            .expect("serve parses");
        match cli.command {
            Some(Command::Serve(args)) => {
                assert_eq!(args.port, Some(8080));
                assert!(args.host.is_none());
            }
            None => panic!("serve command expected"),
        }
    }
}
