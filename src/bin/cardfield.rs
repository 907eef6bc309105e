//! CLI tool for trying out card field editing.
//!
//! # Usage
//!
//! ```bash
//! # Type a keystroke script into a card number field
//! cardfield replay number "4242424<bs>2424242424242"
//!
//! # Expiry field, judged against a fixed month
//! cardfield replay expire "1<left>3" --today 10/2026
//!
//! # CVC of an Amex card, JSON output
//! cardfield replay cvc "1234" --card-number 378282246310005 -o json
//!
//! # Canonical formatting of a value
//! cardfield format number 378282246310005
//!
//! # Classify a value
//! cardfield classify expire 12/30
//!
//! # Fill a whole form and check it
//! cardfield form --number 4242424242424242 --expire 1230 --cvc 123 --zip 75001
//! ```
//!
//! Set `RUST_LOG=card_field=trace` to see every pipeline evaluation.

use std::process::ExitCode;

use card_field::expiry::YearMonth;
use card_field::format::{format_card_number, format_expire_date, strip_formatting};
use card_field::keys::{apply_keystroke, parse_script, Keystroke};
use card_field::{
    detect, mask, CardField, CardForm, EditRequest, EditSnapshot, FieldKind, FieldValidator,
    FormConfig, ValidateResult, Verdict,
};
use clap::{Parser, Subcommand, ValueEnum};
use serde::Serialize;

#[derive(Parser)]
#[command(name = "cardfield")]
#[command(
    author,
    version,
    about = "Live reformatting and validation of payment card fields"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Type a keystroke script into an empty field, printing every step
    Replay {
        /// Field kind: number, expire, cvc, name, text or country
        field: FieldKind,

        /// Keystrokes, e.g. "4242<bs>2<left><del>" or "<paste:4242 4242>"
        script: String,

        #[command(flatten)]
        context: Context,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Print the canonical display form of a value
    Format {
        /// Field kind: number or expire
        field: FieldKind,

        /// Value to format
        value: String,
    },

    /// Classify a value as valid, incomplete or invalid
    Classify {
        /// Field kind
        field: FieldKind,

        /// Value to classify
        value: String,

        #[command(flatten)]
        context: Context,

        /// Output format
        #[arg(short, long, default_value = "text")]
        output: OutputFormat,
    },

    /// Fill a card form and report the first field that needs attention
    Form {
        /// Card number
        #[arg(long, default_value = "")]
        number: String,

        /// Expiry date
        #[arg(long, default_value = "")]
        expire: String,

        /// Card verification code
        #[arg(long, default_value = "")]
        cvc: String,

        /// Cardholder name; adds the field to the form
        #[arg(long)]
        name: Option<String>,

        /// Billing country; adds the field to the form
        #[arg(long)]
        country: Option<String>,

        /// Billing postal code; adds the field to the form
        #[arg(long)]
        zip: Option<String>,

        /// Month to judge the expiry date against (MM/YYYY)
        #[arg(long, value_parser = parse_year_month)]
        today: Option<YearMonth>,
    },

    /// Detect the card brand from a (partial) number
    Detect {
        /// Card number or prefix
        card_number: String,
    },
}

#[derive(clap::Args)]
struct Context {
    /// Card number a CVC belongs to
    #[arg(long)]
    card_number: Option<String>,

    /// Month to judge expiry dates against (MM/YYYY)
    #[arg(long, value_parser = parse_year_month)]
    today: Option<YearMonth>,
}

impl Context {
    fn validator(&self, kind: FieldKind) -> FieldValidator {
        let validator = match (kind, &self.card_number) {
            (FieldKind::Cvc, Some(number)) => {
                let number = number.clone();
                FieldValidator::cvc(move || number.clone())
            }
            _ => FieldValidator::for_kind(kind),
        };
        match self.today {
            Some(today) => validator.with_today(today),
            None => validator,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

#[derive(Serialize)]
struct Step {
    key: String,
    #[serde(flatten)]
    result: ValidateResult,
}

fn parse_year_month(input: &str) -> Result<YearMonth, String> {
    let (month, year) = input
        .split_once('/')
        .ok_or_else(|| format!("expected MM/YYYY, got '{}'", input))?;
    let month: u8 = month
        .trim()
        .parse()
        .map_err(|_| format!("invalid month '{}'", month))?;
    let year: u16 = year
        .trim()
        .parse()
        .map_err(|_| format!("invalid year '{}'", year))?;
    if !(1..=12).contains(&month) {
        return Err(format!("month {} out of range 1-12", month));
    }
    Ok(YearMonth::new(year, month))
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Replay {
            field,
            script,
            context,
            output,
        } => cmd_replay(field, &script, &context, output),
        Commands::Format { field, value } => cmd_format(field, &value),
        Commands::Classify {
            field,
            value,
            context,
            output,
        } => cmd_classify(field, &value, &context, output),
        Commands::Form {
            number,
            expire,
            cvc,
            name,
            country,
            zip,
            today,
        } => cmd_form(
            [
                (CardField::Number, Some(number)),
                (CardField::ExpireDate, Some(expire)),
                (CardField::Cvc, Some(cvc)),
                (CardField::Name, name),
                (CardField::AddressCountry, country),
                (CardField::AddressZip, zip),
            ],
            today,
        ),
        Commands::Detect { card_number } => cmd_detect(&card_number),
    }
}

fn cmd_replay(field: FieldKind, script: &str, context: &Context, output: OutputFormat) -> ExitCode {
    let keys = match parse_script(script) {
        Ok(keys) => keys,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::from(2);
        }
    };
    let validator = context.validator(field);

    let mut snapshot = EditSnapshot::default();
    let mut steps = Vec::with_capacity(keys.len());
    for key in &keys {
        let after = apply_keystroke(&snapshot, key);
        let result = validator.evaluate(&EditRequest::new(snapshot, after));
        snapshot = EditSnapshot::new(result.value.clone(), result.cursor_position);
        steps.push(Step {
            key: key.to_string(),
            result,
        });
    }

    match output {
        OutputFormat::Text => {
            for step in &steps {
                print_step(&step.key, &step.result);
            }
        }
        OutputFormat::Json => print_json(&steps),
    }

    match steps.last() {
        Some(step) if step.result.invalid => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    }
}

fn print_step(key: &str, result: &ValidateResult) {
    let caret = result.cursor_position;
    let shown: String = result
        .value
        .chars()
        .take(caret)
        .chain(std::iter::once('|'))
        .chain(result.value.chars().skip(caret))
        .collect();
    let mut flags = Vec::new();
    if result.invalid {
        flags.push("invalid");
    }
    if result.finished {
        flags.push("finished");
    }
    println!("{:<12} {:<24} {}", key, format!("\"{}\"", shown), flags.join(" "));
}

fn cmd_format(field: FieldKind, value: &str) -> ExitCode {
    match field {
        FieldKind::CardNumber => println!("{}", format_card_number(value)),
        FieldKind::ExpireDate => println!("{}", format_expire_date(value)),
        FieldKind::Cvc => println!("{}", strip_formatting(value)),
        _ => println!("{}", value),
    }
    ExitCode::SUCCESS
}

fn cmd_classify(field: FieldKind, value: &str, context: &Context, output: OutputFormat) -> ExitCode {
    let validator = context.validator(field);
    let input = if field.is_numeric() && field != FieldKind::ExpireDate {
        strip_formatting(value)
    } else {
        value.to_string()
    };
    let verdict: Verdict = validator.classify(&input);

    match output {
        OutputFormat::Text => println!("{}", verdict),
        OutputFormat::Json => print_json(&verdict),
    }

    if verdict.is_invalid() {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn cmd_form(values: [(CardField, Option<String>); 6], today: Option<YearMonth>) -> ExitCode {
    let config = FormConfig {
        need_cardholder_name: values[3].1.is_some(),
        need_country: values[4].1.is_some(),
        need_zip: values[5].1.is_some(),
        default_country: String::new(),
    };
    let mut form = CardForm::new(&config);
    if let Some(today) = today {
        form = form.with_today(today);
    }

    for (field, value) in &values {
        if let Some(value) = value {
            form.edit(*field, &Keystroke::Insert(value.clone()));
        }
    }

    for field in form.fields() {
        println!("{:<8} {}", field.name(), shown_value(&form, field));
    }

    match form.first_invalid() {
        Some(field) => {
            println!("Complete: no (check {})", field);
            ExitCode::FAILURE
        }
        None => {
            println!("Complete: yes");
            println!("Card: {}", form.collect());
            ExitCode::SUCCESS
        }
    }
}

fn shown_value(form: &CardForm, field: CardField) -> String {
    let value = form.value(field).unwrap_or_default();
    match field {
        CardField::Number => mask::mask_card_number(value),
        CardField::Cvc => mask::mask_secret(value).to_string(),
        _ => value.to_string(),
    }
}

fn cmd_detect(card_number: &str) -> ExitCode {
    match detect::detect_brand_str(card_number) {
        Some(brand) => {
            println!("Brand: {}", brand.name());
            println!("CVC length: {}", brand.cvc_length());
            println!("Grouping: {:?}", brand.groups(brand.typical_length()));
            ExitCode::SUCCESS
        }
        None => {
            println!("Brand: unknown");
            ExitCode::FAILURE
        }
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error: {}", e),
    }
}
