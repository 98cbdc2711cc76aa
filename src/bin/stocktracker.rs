use stocktracker::api::ApiClient;
use stocktracker::chart::{ChartTheme, TermChart};
use stocktracker::config::Config;
use stocktracker::dashboard::render_performers;
use stocktracker::session::ChartSession;

use clap::{App, Arg, SubCommand};
use crossterm::style::Stylize;
use crossterm::terminal;
use log::info;
use std::io::{self, BufRead, Write};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logger
    env_logger::init();

    let app = App::new("StockTracker")
        .version("0.1.0")
        .about("Terminal stock price tracker");

    let app = app.subcommand(
        SubCommand::with_name("track")
            .about("Track a stock symbol as a candlestick chart")
            .arg(
                Arg::with_name("symbol")
                    .short('s')
                    .long("symbol")
                    .value_name("SYMBOL")
                    .help("Initial stock symbol to display")
                    .takes_value(true)
                    .default_value("AAPL"),
            )
            .arg(
                Arg::with_name("height")
                    .long("height")
                    .value_name("ROWS")
                    .help("Fixed chart height in terminal rows")
                    .takes_value(true)
                    .default_value("20"),
            )
            .arg(
                Arg::with_name("api-base")
                    .long("api-base")
                    .value_name("URL")
                    .help("Base URL of the backend API")
                    .takes_value(true)
                    .default_value("http://localhost:8000"),
            ),
    ).subcommand(
        SubCommand::with_name("performers")
            .about("Show the S&P 500 top performers table")
            .arg(
                Arg::with_name("api-base")
                    .long("api-base")
                    .value_name("URL")
                    .help("Base URL of the backend API")
                    .takes_value(true)
                    .default_value("http://localhost:8000"),
            ),
    );

    let matches = app.get_matches();

    if let Some(matches) = matches.subcommand_matches("track") {
        let symbol = matches.value_of("symbol").unwrap();
        let api_base = matches.value_of("api-base").unwrap();
        let height = matches.value_of("height")
            .unwrap_or("20")
            .parse::<u16>()
            .unwrap_or(20);

        let config = Config::new()
            .with_api_base(api_base)
            .with_default_symbol(symbol)
            .with_chart_height(height);

        run_tracker(config).await?;
    } else if let Some(matches) = matches.subcommand_matches("performers") {
        let api_base = matches.value_of("api-base").unwrap();
        let config = Config::new().with_api_base(api_base);

        run_performers(config).await?;
    } else {
        info!("No command specified. Use --help for usage information.");
    }

    Ok(())
}

/// 交互式K线图：挂载会话，按回车提交新代码，quit退出
async fn run_tracker(config: Config) -> anyhow::Result<()> {
    let backend = ApiClient::new(&config)?;
    let mut last_width = terminal_width();

    let surface = TermChart::new(last_width, config.chart_height, ChartTheme::default());
    let mut session = ChartSession::new(backend, &config.default_symbol, config.chart_height);

    println!("Stock Price Tracker");
    print_title(session.symbol());
    // 挂载即发出首次请求并绘图
    session.mount(Box::new(surface)).await;
    print_error_banner(session.error());

    let stdin = io::stdin();
    let mut line = String::new();
    loop {
        print!("symbol ({}), or quit> ", session.symbol());
        io::stdout().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input.eq_ignore_ascii_case("quit") || input.eq_ignore_ascii_case("exit") {
            break;
        }

        // 终端宽度变了就先调整表面尺寸，再重绘
        let width = terminal_width();
        if width != last_width {
            last_width = width;
            session.on_resize(width);
        }

        session.set_symbol(input);
        print_title(session.symbol());
        let ticker = session.symbol().to_string();
        session.request_fetch(&ticker).await;
        print_error_banner(session.error());
    }

    session.teardown();
    Ok(())
}

async fn run_performers(config: Config) -> anyhow::Result<()> {
    let backend = ApiClient::new(&config)?;

    use stocktracker::api::StockBackend;
    let performers = backend.fetch_performers().await?;

    println!("S&P 500 Top Performers");
    println!();
    print!("{}", render_performers(&performers));
    Ok(())
}

fn terminal_width() -> u16 {
    terminal::size().map(|(w, _)| w).unwrap_or(80)
}

fn print_title(symbol: &str) {
    println!();
    println!("{}", format!("── {} ──", symbol).bold());
}

fn print_error_banner(error: Option<&str>) {
    if let Some(message) = error {
        eprintln!("{}", format!("Error: {}", message).white().on_red());
    }
}
