use clap::Parser;
use notevault::cli::commands::add::AddArgs;
use notevault::cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    notevault::logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Init => notevault::cli::commands::init::execute(&cli),
        Commands::Add {
            ref category,
            ref title,
            ref content,
            ref file,
            ref name,
        } => notevault::cli::commands::add::execute(
            &cli,
            AddArgs {
                category,
                title,
                content: content.as_deref(),
                file: file.as_deref(),
                name: name.as_deref(),
            },
        ),
        Commands::List { ref query } => {
            notevault::cli::commands::list::execute(&cli, query.as_deref())
        }
        Commands::Show { ref id } => notevault::cli::commands::show::execute(&cli, id),
        Commands::Delete { ref id, force } => {
            notevault::cli::commands::delete::execute(&cli, id, force)
        }
        Commands::Tally => notevault::cli::commands::tally::execute(&cli),
        Commands::Copy { ref id } => notevault::cli::commands::copy::execute(&cli, id),
        Commands::Completions { shell } => notevault::cli::commands::completions::execute(shell),
    };

    if let Err(e) = result {
        notevault::cli::output::error(&e.to_string());
        std::process::exit(1);
    }
}
