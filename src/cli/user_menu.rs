//! Account menu: register, login, logout, profile, top-up, password change.

use crate::cli::input;
use crate::service::UserService;
use crate::session::Session;

pub(super) async fn run(users: &UserService, session: &mut Session) {
    loop {
        println!("\n=== Account Menu ===");
        println!("1. Register");
        println!("2. Login");
        println!("3. Logout");
        println!("4. My info");
        println!("5. Top up balance");
        println!("6. Change password");
        println!("0. Back");

        match input::prompt("Select: ").as_str() {
            "1" => register(users).await,
            "2" => login(users, session).await,
            "3" => logout(session),
            "4" => my_info(users, session).await,
            "5" => top_up(users, session).await,
            "6" => change_password(users, session).await,
            "0" => return,
            _ => println!("Invalid selection, try again."),
        }
    }
}

async fn register(users: &UserService) {
    println!("\n=== Register ===");

    let id = input::prompt("Id (alphanumeric, 3+ chars): ");
    if !input::is_valid_id(&id) {
        println!("That id is not acceptable.");
        return;
    }

    let password = input::prompt("Password (4+ chars): ");
    let name = input::prompt("Name: ");

    match users.register(&id, &password, &name).await {
        Ok(user) => {
            println!("Welcome, {}!", user.name);
            println!("Starting balance: {:.0} won", user.balance);
        }
        Err(e) => println!("Registration failed: {e}"),
    }
}

async fn login(users: &UserService, session: &mut Session) {
    if session.is_logged_in() {
        println!("Already logged in.");
        return;
    }

    println!("\n=== Login ===");
    let id = input::prompt("Id: ");
    let password = input::prompt("Password: ");

    match users.login(&id, &password).await {
        Ok(user) => {
            println!("Welcome back, {}!", user.name);
            session.login(user);
        }
        Err(e) => println!("Login failed: {e}"),
    }
}

fn logout(session: &mut Session) {
    if !session.is_logged_in() {
        println!("Not logged in.");
        return;
    }
    session.logout();
    println!("Logged out.");
}

async fn my_info(users: &UserService, session: &Session) {
    let Some(user) = session.current_user() else {
        println!("Login required.");
        return;
    };

    println!("\n=== My Info ===");
    println!("Id:   {}", user.id);
    println!("Name: {}", user.name);

    // The session copy can be stale; the balance comes from the service.
    match users.balance_of(&user.id).await {
        Ok(balance) => println!("Balance: {balance:.0} won"),
        Err(e) => println!("Could not read balance: {e}"),
    }
}

async fn top_up(users: &UserService, session: &Session) {
    let Some(user_id) = session.user_id() else {
        println!("Login required.");
        return;
    };

    let Some(amount) = input::parse_positive_amount(&input::prompt("Amount to add: ")) else {
        println!("Enter a positive amount.");
        return;
    };

    match users.add_balance(user_id, amount).await {
        Ok(balance) => println!("New balance: {balance:.0} won"),
        Err(e) => println!("Top up failed: {e}"),
    }
}

async fn change_password(users: &UserService, session: &Session) {
    let Some(user_id) = session.user_id() else {
        println!("Login required.");
        return;
    };

    let current = input::prompt("Current password: ");
    let new = input::prompt("New password (4+ chars): ");

    match users.change_password(user_id, &current, &new).await {
        Ok(()) => println!("Password changed."),
        Err(e) => println!("Password change failed: {e}"),
    }
}
