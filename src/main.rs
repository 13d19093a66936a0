// Alke Wallet - demo CLI
// Thin presentation layer over the wallet library: login gate, deposits,
// transfers, contact management and movement history.

use anyhow::{bail, Result};
use std::env;
use std::fs::File;

use alke_wallet::{CredentialVerifier, TxKind, Wallet};

/// Placeholder credential check for the demo binary only. This is not a
/// security mechanism; a real deployment plugs in its own verifier.
struct DemoCredentials;

impl CredentialVerifier for DemoCredentials {
    fn verify(&self, email: &str, password: &str) -> bool {
        email == "user@alke.cl" && password == "1234"
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_usage();
        return Ok(());
    }

    let db_path = env::var("WALLET_DB").unwrap_or_else(|_| "wallet.db".to_string());
    let wallet = Wallet::open(&db_path)?;

    match args[1].as_str() {
        "login" => {
            if args.len() < 4 {
                bail!("Usage: alke-wallet login <email> <password>");
            }
            match wallet.sign_in(&DemoCredentials, &args[2], &args[3])? {
                Some(session) => println!("✓ Sesión iniciada: {}", session.email),
                None => bail!("Credenciales incorrectas."),
            }
        }

        "logout" => {
            require_session(&wallet)?;
            wallet.sign_out()?;
            println!("✓ Sesión cerrada");
        }

        "balance" => {
            require_session(&wallet)?;
            println!("💰 Saldo: ${:.2}", wallet.ledger.balance()?);
        }

        "deposit" => {
            require_session(&wallet)?;
            if args.len() < 3 {
                bail!("Usage: alke-wallet deposit <amount>");
            }
            let amount: f64 = args[2].parse()?;
            let balance = wallet.deposit(amount)?;
            println!("✓ Depósito realizado");
            println!("💰 Saldo: ${:.2}", balance);
        }

        "send" => {
            require_session(&wallet)?;
            if args.len() < 4 {
                bail!("Usage: alke-wallet send <account> <amount>");
            }
            let account = &args[2];
            let amount: f64 = args[3].parse()?;
            let balance = wallet.transfer_to(amount, account)?;
            println!("✓ Transferencia exitosa");
            println!("💰 Saldo: ${:.2}", balance);
        }

        "contacts" => {
            require_session(&wallet)?;
            for contact in wallet.contacts.list_all()? {
                println!("  {} ({})", contact.name, contact.account);
            }
        }

        "add-contact" => {
            require_session(&wallet)?;
            if args.len() < 4 {
                bail!("Usage: alke-wallet add-contact <name> <account>");
            }
            let contact = wallet.contacts.add(&args[2], &args[3])?;
            println!("✓ Contacto agregado: {} ({})", contact.name, contact.account);
        }

        "search" => {
            require_session(&wallet)?;
            let query = args.get(2).map(String::as_str).unwrap_or("");
            let matches = wallet.contacts.search(query)?;
            if matches.is_empty() {
                println!("Sin resultados");
            }
            for contact in matches {
                println!("  {} ({})", contact.name, contact.account);
            }
        }

        "history" => {
            require_session(&wallet)?;
            // The short view shows the 5 most recent movements
            let limit = match args.get(2).map(String::as_str) {
                None => Some(5),
                Some("all") => None,
                Some(n) => Some(n.parse()?),
            };
            let transactions = wallet.ledger.transactions(limit)?;
            if transactions.is_empty() {
                println!("No hay movimientos.");
            }
            for tx in transactions {
                let label = match tx.kind {
                    TxKind::Deposit => "Depósito",
                    TxKind::Transfer => "Envío",
                };
                println!(
                    "  {} - {} - ${:.2}  [{}]",
                    label, tx.detail, tx.amount, tx.timestamp
                );
            }
        }

        "export" => {
            require_session(&wallet)?;
            if args.len() < 3 {
                bail!("Usage: alke-wallet export <path>");
            }
            let file = File::create(&args[2])?;
            let rows = wallet.ledger.export_csv(file)?;
            println!("✓ Exported {} movements to {}", rows, args[2]);
        }

        other => {
            eprintln!("Unknown command: {}", other);
            print_usage();
        }
    }

    Ok(())
}

fn require_session(wallet: &Wallet) -> Result<()> {
    if !wallet.session.is_active()? {
        bail!("No active session. Run: alke-wallet login <email> <password>");
    }
    Ok(())
}

fn print_usage() {
    println!("Alke Wallet v{}", alke_wallet::VERSION);
    println!();
    println!("Usage: alke-wallet <command>");
    println!();
    println!("Commands:");
    println!("  login <email> <password>       Open a session");
    println!("  logout                         Close the session");
    println!("  balance                        Show the current balance");
    println!("  deposit <amount>               Add money to the balance");
    println!("  send <account> <amount>        Transfer money to an account");
    println!("  contacts                       List saved contacts");
    println!("  add-contact <name> <account>   Save a new contact");
    println!("  search <query>                 Search contacts by name or account");
    println!("  history [all|N]                Recent movements (default: 5)");
    println!("  export <path>                  Write all movements as CSV");
    println!();
    println!("The database path is taken from WALLET_DB (default: wallet.db)");
}
