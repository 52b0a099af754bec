use clap::{Parser, Subcommand};
use dotenv::dotenv;
use reestr::models::source::LookupMode;
use reestr::{init_logging, load_app_config, run_lookups, run_status};

/// Reestr - проверка членства организации в реестре СРО по ИНН
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Путь к файлу конфигурации (YAML); без него используются значения по умолчанию
    #[arg(short, long)]
    config: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Найти организации по ИНН, по одному JSON-результату на строку
    Lookup {
        #[arg(required = true)]
        inns: Vec<String>,
        /// Фоновый режим: длинный таймаут
        #[arg(long)]
        background: bool,
        /// Дописать найденные на сайте записи в снимок реестра
        #[arg(long)]
        sync_snapshot: bool,
    },
    /// Проверить доступность сайта реестра
    Status,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let args = Args::parse();
    let cfg = load_app_config(args.config.as_deref())?;
    init_logging(&cfg);

    match args.command {
        Command::Lookup {
            inns,
            background,
            sync_snapshot,
        } => {
            let mode = if background {
                LookupMode::Background
            } else {
                LookupMode::Interactive
            };
            for result in run_lookups(&cfg, &inns, mode, sync_snapshot).await? {
                println!("{}", serde_json::to_string(&result)?);
            }
        }
        Command::Status => {
            let status = run_status(&cfg).await?;
            println!("{}", serde_json::json!({ "site": status }));
        }
    }
    Ok(())
}
