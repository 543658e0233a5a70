//! Text-menu front end.
//!
//! One loop per menu level; "0" always returns to the parent. Every failure
//! is printed as one human-readable line — a business-rule violation never
//! terminates the process.

pub mod input;
mod order_menu;
mod product_menu;
mod user_menu;

use crate::lifecycle::ShopSystem;
use crate::session::Session;

/// Runs the interactive menu loop until the user exits.
pub async fn run(system: &ShopSystem) {
    let mut session = Session::new();

    println!("==============================");
    println!("  Mini Shop v{}", env!("CARGO_PKG_VERSION"));
    println!("==============================");

    loop {
        print_main_menu(&session);

        match input::prompt("\nSelect: ").as_str() {
            "1" => user_menu::run(&system.users, &mut session).await,
            "2" => product_menu::run(&system.products).await,
            "3" => order_menu::run(&system.orders, &system.products, &session).await,
            "0" => {
                println!("\nGoodbye!");
                return;
            }
            _ => println!("Invalid selection, try again."),
        }
    }
}

fn print_main_menu(session: &Session) {
    println!("\n=== Main Menu ===");
    match session.current_user() {
        Some(user) => println!("Logged in as {}", user.name),
        None => println!("Not logged in"),
    }

    println!("\n1. Account");
    println!("2. Products");
    println!("3. Orders");
    println!("0. Exit");
}
