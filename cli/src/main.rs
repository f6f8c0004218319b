//! Interactive demo for the top-up simulator
//!
//! Drives one top-up attempt end to end from the terminal: resolve the
//! account, show the quote, pace a fake processing indicator, run the
//! payment, and print the receipt plus recent history. All state lives in
//! a local JSON file; nothing leaves the machine.

use std::io::Write;
use std::process::ExitCode;

use topup_simulator_core_rs::{
    CardDetails, CheckoutError, CheckoutService, Currency, GatewayConfig, HistoryRecord,
    HistoryStore, IdentifierResolver, JsonFileStore, LoggingTransport, OfflineIdentityProvider,
    PaymentGateway, PaymentMethod, PlayerProfile, ProgressSchedule, Quote, ReceiptNotifier,
    RecordStatus,
};

const DEFAULT_HISTORY_FILE: &str = "topup-history.json";
const DEFAULT_EMAIL: &str = "demo@example.com";

struct Args {
    identifier: String,
    amount: i64,
    method: PaymentMethod,
    email: String,
    seed: u64,
    history_file: String,
    show_history: bool,
}

fn print_usage() {
    eprintln!("Usage: topup-demo <identifier> <amount> [method] [options]");
    eprintln!("       topup-demo history [options]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  identifier   SteamID64, STEAM_x:y:z triplet, or vanity name");
    eprintln!("  amount       rubles to credit, e.g. 500 or 499.99");
    eprintln!("  method       card | qiwi | yoomoney | mobile (default: qiwi)");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --email <addr>     receipt address (default: {DEFAULT_EMAIL})");
    eprintln!("  --seed <n>         RNG seed for reproducible outcomes");
    eprintln!("  --history <file>   history file (default: {DEFAULT_HISTORY_FILE})");
}

/// Parse a ruble amount like `500` or `499.99` into minor units.
fn parse_amount(input: &str) -> Option<i64> {
    let (rubles, kopeks) = match input.split_once('.') {
        Some((r, k)) => {
            if k.is_empty() || k.len() > 2 || !k.bytes().all(|b| b.is_ascii_digit()) {
                return None;
            }
            let scale = if k.len() == 1 { 10 } else { 1 };
            (r, k.parse::<i64>().ok()? * scale)
        }
        None => (input, 0),
    };
    if rubles.is_empty() || !rubles.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(rubles.parse::<i64>().ok()? * 100 + kopeks)
}

fn parse_method(input: &str) -> Option<PaymentMethod> {
    PaymentMethod::ALL
        .iter()
        .copied()
        .find(|m| m.code() == input)
}

fn parse_args(argv: &[String]) -> Option<Args> {
    let mut positional: Vec<&String> = Vec::new();
    let mut email = DEFAULT_EMAIL.to_string();
    let mut seed = 0u64;
    let mut history_file = DEFAULT_HISTORY_FILE.to_string();

    let mut iter = argv.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--email" => email = iter.next()?.clone(),
            "--seed" => seed = iter.next()?.parse().ok()?,
            "--history" => history_file = iter.next()?.clone(),
            flag if flag.starts_with("--") => return None,
            _ => positional.push(arg),
        }
    }

    if positional.first().map(|s| s.as_str()) == Some("history") {
        return Some(Args {
            identifier: String::new(),
            amount: 0,
            method: PaymentMethod::Qiwi,
            email,
            seed,
            history_file,
            show_history: true,
        });
    }

    if positional.len() < 2 || positional.len() > 3 {
        return None;
    }

    let identifier = positional[0].clone();
    let amount = parse_amount(positional[1])?;
    let method = match positional.get(2) {
        Some(raw) => parse_method(raw)?,
        None => PaymentMethod::Qiwi,
    };

    Some(Args {
        identifier,
        amount,
        method,
        email,
        seed,
        history_file,
        show_history: false,
    })
}

fn format_money(minor: i64) -> String {
    format!("{}.{:02} RUB", minor / 100, (minor % 100).abs())
}

fn print_profile(profile: &PlayerProfile) {
    println!("Account");
    println!("  Nickname:   {}", profile.nickname);
    println!("  SteamID:    {}", profile.steam_id);
    println!("  SteamID64:  {}", profile.steam_id64);
    println!("  Status:     {}", profile.status.text());
    println!("  Level:      {}", profile.level);
    if profile.is_demo {
        println!("  (demo profile: real lookup unavailable)");
    }
    println!();
}

fn print_quote(quote: &Quote, method: PaymentMethod) {
    println!("Quote");
    println!("  Top-up:     {}", format_money(quote.amount));
    println!("  Commission: {}", format_money(quote.fee));
    println!("  Total:      {}", format_money(quote.total));
    println!("  Method:     {}", method.display_name());
    println!();
}

fn print_record(record: &HistoryRecord) {
    let marker = match record.status {
        RecordStatus::Completed => "+",
        RecordStatus::Failed => "x",
    };
    print!(
        "  {} {}  {}  {}  {}",
        marker,
        record.date.format("%d.%m.%Y %H:%M"),
        format_money(record.total),
        record.method.display_name(),
        record.nickname,
    );
    if let Some(reason) = record.decline_reason {
        print!("  ({reason})");
    }
    println!();
}

/// Pace the fake processing indicator over the method's nominal duration.
fn run_progress(method: PaymentMethod) {
    let schedule = ProgressSchedule::new(method.processing_time());
    let interval = schedule.interval();

    for percent in schedule {
        print!("\rProcessing payment... {percent:3.0}%");
        let _ = std::io::stdout().flush();
        std::thread::sleep(interval);
    }
    println!();
}

fn run(args: Args) -> ExitCode {
    let store = match JsonFileStore::open(&args.history_file) {
        Ok(store) => store,
        Err(err) => {
            eprintln!("error: cannot open {}: {err}", args.history_file);
            return ExitCode::FAILURE;
        }
    };
    let history = HistoryStore::new(Box::new(store));

    if args.show_history {
        let records = history.list();
        if records.is_empty() {
            println!("No payments yet.");
        } else {
            println!("Payment history (newest first)");
            for record in &records {
                print_record(record);
            }
        }
        return ExitCode::SUCCESS;
    }

    let gateway = PaymentGateway::new(GatewayConfig {
        rng_seed: args.seed,
        ..GatewayConfig::default()
    });
    let resolver = IdentifierResolver::new(Box::new(OfflineIdentityProvider), args.seed);
    let notifier = ReceiptNotifier::new(Box::new(LoggingTransport));
    let mut service = CheckoutService::new(gateway, resolver, history, notifier);

    let profile = match service.preview_profile(&args.identifier) {
        Ok(profile) => profile,
        Err(err) => {
            eprintln!("error: {err}");
            return ExitCode::FAILURE;
        }
    };
    print_profile(&profile);
    print_quote(&Quote::new(args.amount), args.method);

    // Card payments in the demo always use the first showcase card.
    let demo_cards = CardDetails::demo_cards();
    let card = args
        .method
        .requires_card_details()
        .then(|| &demo_cards[0]);

    run_progress(args.method);

    match service.top_up(
        &args.identifier,
        &args.email,
        args.amount,
        Currency::Rub,
        args.method,
        card,
    ) {
        Ok(receipt) => {
            println!();
            println!("Payment completed");
            println!("  Transaction:   {}", receipt.record.id);
            println!(
                "  Authorization: {}",
                receipt.record.authorization_code.as_deref().unwrap_or("-")
            );
            println!("  Charged:       {}", format_money(receipt.record.total));
            println!("  Receipt:       {}", receipt.delivery.message);
            println!();
            println!("Recent payments");
            for record in service.history().iter().take(5) {
                print_record(record);
            }
            ExitCode::SUCCESS
        }
        Err(CheckoutError::Payment(err)) => {
            println!();
            println!("Payment declined: {err}");
            println!("The attempt was recorded; run `topup-demo history` to review.");
            ExitCode::from(2)
        }
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::WARN)
        .with_target(false)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    match parse_args(&argv) {
        Some(args) => run(args),
        None => {
            print_usage();
            ExitCode::FAILURE
        }
    }
}
