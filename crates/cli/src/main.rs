use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use receita_core::config::{clinic_label_from_env_value, utc_offset_from_env_value};
use receita_core::{
    cpf, names, render, CoreConfig, Cpf, Prescription, PrescriptionForm, PrescriptionPayload,
};
use std::fs;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "receita")]
#[command(about = "Receita prescription tools")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a CPF's check digits
    ValidateCpf {
        /// CPF, with or without punctuation
        cpf: String,
    },
    /// Append the two check digits to the first nine digits of a CPF
    CompleteCpf {
        /// Nine digits, punctuation allowed
        base: String,
    },
    /// Format a partial or complete CPF
    FormatCpf {
        /// Digits typed so far
        raw: String,
    },
    /// Capitalise every word of a name
    ProperCase {
        /// Name parts
        #[arg(required = true)]
        name: Vec<String>,
    },
    /// Render a prescription payload (JSON) to HTML
    Render {
        /// Payload file in the HTTP request shape
        payload: PathBuf,
        /// Write the document here instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
        /// Date printed on the document (YYYY-MM-DD); defaults to today at the clinic
        #[arg(long)]
        date: Option<String>,
    },
    /// Validate a form (JSON) and print the payload it produces
    CheckForm {
        /// Form file
        form: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::ValidateCpf { cpf: input }) => match input.parse::<Cpf>() {
            Ok(valid) => println!("valid {}", valid),
            Err(_) => {
                println!("invalid {}", cpf::format(&input));
                std::process::exit(1);
            }
        },
        Some(Commands::CompleteCpf { base }) => {
            let digits: Vec<u8> = cpf::digits(&base).bytes().map(|b| b - b'0').collect();
            let Ok(base) = <[u8; 9]>::try_from(digits.as_slice()) else {
                eprintln!("Expected 9 digits, got {}", digits.len());
                std::process::exit(1);
            };
            let [first, second] = cpf::check_digits(&base);
            let full: String = base
                .iter()
                .chain([first, second].iter())
                .map(|&d| char::from(b'0' + d))
                .collect();
            println!("{}", Cpf::parse(&full)?);
        }
        Some(Commands::FormatCpf { raw }) => {
            println!("{}", cpf::format(&raw));
        }
        Some(Commands::ProperCase { name }) => {
            println!("{}", names::proper_case(&name.join(" ")));
        }
        Some(Commands::Render { payload, out, date }) => {
            let contents = fs::read_to_string(&payload)?;
            let payload: PrescriptionPayload = serde_json::from_str(&contents)?;
            let cfg = CoreConfig::new(
                utc_offset_from_env_value(std::env::var("RECEITA_UTC_OFFSET").ok())?,
                clinic_label_from_env_value(std::env::var("RECEITA_CLINIC_LABEL").ok()),
            )?;
            let rendered = match date {
                Some(d) => {
                    let date = NaiveDate::parse_from_str(&d, "%Y-%m-%d")?;
                    Prescription::try_from_payload(&payload).and_then(|prescription| {
                        render::render_prescription(&prescription, date, cfg.clinic_label())
                    })
                }
                None => render::render_today(&payload, &cfg),
            };
            let html = match rendered {
                Ok(html) => html,
                Err(e) if e.is_validation() => {
                    eprintln!("Error validating prescription: {}", e);
                    std::process::exit(1);
                }
                Err(e) => return Err(e.into()),
            };

            match out {
                Some(path) => {
                    fs::write(&path, html)?;
                    println!("Wrote prescription to {}", path.display());
                }
                None => print!("{}", html),
            }
        }
        Some(Commands::CheckForm { form }) => {
            let contents = fs::read_to_string(&form)?;
            let form: PrescriptionForm = serde_json::from_str(&contents)?;
            match form.into_payload(None) {
                Ok(payload) => println!("{}", serde_json::to_string_pretty(&payload)?),
                Err(e) => {
                    eprintln!("Form rejected: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            println!("Use 'receita --help' for commands");
        }
    }

    Ok(())
}
