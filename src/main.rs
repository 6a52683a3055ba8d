use dotenvy::dotenv;
use log::info;
use std::collections::HashMap;
use std::io::{self, BufRead, Write};
use std::sync::Mutex;

mod models;
mod page;
mod services;

use page::interaction_controller::InteractionController;
use page::surface::{self, OutputRegion, PageInputs};

const INPUT_FIELDS: [&str; 4] = [
    surface::MESSAGE_FIELD,
    surface::USER_ID_FIELD,
    surface::PASSWORD_FIELD,
    surface::AUTH_MESSAGE_FIELD,
];

/// Console stand-in for the host page: a field map plus a stdin prompt.
struct ConsolePage {
    fields: Mutex<HashMap<String, String>>,
}

impl ConsolePage {
    fn new() -> Self {
        let fields = INPUT_FIELDS
            .iter()
            .map(|id| (id.to_string(), String::new()))
            .collect();
        Self {
            fields: Mutex::new(fields),
        }
    }

    fn set_field(&self, id: &str, value: &str) {
        self.fields
            .lock()
            .expect("field map lock poisoned")
            .insert(id.to_string(), value.to_string());
    }
}

impl PageInputs for ConsolePage {
    fn field_value(&self, id: &str) -> String {
        self.fields
            .lock()
            .expect("field map lock poisoned")
            .get(id)
            .cloned()
            .unwrap_or_default()
    }

    fn prompt(&self, label: &str) -> Option<String> {
        print!("{label} ");
        io::stdout().flush().ok()?;

        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            // EOF counts as a cancelled prompt.
            Ok(0) | Err(_) => None,
            Ok(_) => Some(line.trim_end_matches(['\r', '\n']).to_string()),
        }
    }
}

fn print_region(region: &OutputRegion) {
    match region.text() {
        Some(text) => println!("[{}] {}", region.id(), text),
        None => println!("[{}] (empty)", region.id()),
    }
}

fn print_help() {
    println!("Commands:");
    println!("  set <field> <value>   fields: message, user_id, password, auth_message");
    println!("  sign                  sign the message field");
    println!("  verify                verify a signature against the message field");
    println!("  register              register user_id with password");
    println!("  authenticate          authenticate user_id with password and auth_message");
    println!("  show                  print both output regions");
    println!("  quit");
}

#[tokio::main]
async fn main() {
    // Initialize logger
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));
    // Load .env file
    dotenv().ok();

    let gateway_url =
        std::env::var("GATEWAY_URL").unwrap_or_else(|_| "http://127.0.0.1:8000".to_string());

    info!("Using signature gateway at {}", gateway_url);

    let controller = InteractionController::new(gateway_url, ConsolePage::new());

    print_help();

    let stdin = io::stdin();
    loop {
        print!("> ");
        if io::stdout().flush().is_err() {
            break;
        }

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }

        let line = line.trim();
        let mut parts = line.splitn(3, ' ');
        match parts.next() {
            Some("set") => {
                let field = parts.next().unwrap_or_default();
                let value = parts.next().unwrap_or_default();
                if INPUT_FIELDS.contains(&field) {
                    controller.inputs().set_field(field, value);
                } else {
                    println!("Unknown field: {field}");
                }
            }
            Some("sign") => {
                controller.sign_message().await;
                print_region(controller.signature_output());
            }
            Some("verify") => {
                controller.verify_signature().await;
                print_region(controller.signature_output());
            }
            Some("register") => {
                controller.register_user().await;
                print_region(controller.mfa_output());
            }
            Some("authenticate") => {
                controller.authenticate_user().await;
                print_region(controller.mfa_output());
            }
            Some("show") => {
                print_region(controller.signature_output());
                print_region(controller.mfa_output());
            }
            Some("quit") | Some("exit") => break,
            Some("help") => print_help(),
            Some("") | None => {}
            Some(other) => println!("Unknown command: {other}"),
        }
    }
}
