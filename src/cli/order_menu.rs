//! Order menu: place an order, review history. Requires a login.

use crate::cli::input;
use crate::model::ProductId;
use crate::service::{OrderService, ProductService};
use crate::session::Session;

pub(super) async fn run(orders: &OrderService, products: &ProductService, session: &Session) {
    let Some(user_id) = session.user_id() else {
        println!("Login required.");
        return;
    };

    loop {
        println!("\n=== Order Menu ===");
        println!("1. Place an order");
        println!("2. My orders");
        println!("0. Back");

        match input::prompt("Select: ").as_str() {
            "1" => place_order(orders, products, user_id).await,
            "2" => my_orders(orders, user_id).await,
            "0" => return,
            _ => println!("Invalid selection, try again."),
        }
    }
}

async fn place_order(orders: &OrderService, products: &ProductService, user_id: &str) {
    println!("\n=== Place an Order ===");

    match products.available_products().await {
        Ok(list) => {
            println!("\n[Available products]");
            for p in &list {
                println!("{}. {} ({:.0} won, stock {})", p.id, p.name, p.price, p.stock);
            }
        }
        Err(e) => {
            println!("Could not load the catalog: {e}");
            return;
        }
    }

    let Some(product_id) = input::parse_u32(&input::prompt("\nProduct id: ")) else {
        println!("Enter a valid product id.");
        return;
    };
    let Some(quantity) = input::parse_positive_u32(&input::prompt("Quantity: ")) else {
        println!("Enter a valid quantity.");
        return;
    };

    let product = match products.get_product(ProductId(product_id)).await {
        Ok(p) => p,
        Err(e) => {
            println!("{e}");
            return;
        }
    };

    let total = product.price * f64::from(quantity);
    println!("\nOrder: {} x{}, total {:.0} won", product.name, quantity, total);
    if !input::prompt("Confirm? (y/n): ").eq_ignore_ascii_case("y") {
        println!("Order cancelled.");
        return;
    }

    match orders.create_order(user_id, ProductId(product_id), quantity).await {
        Ok(order) => {
            println!("Order placed!");
            println!("  Order id: {}", order.id);
            println!("  Charged:  {:.0} won", order.total_price);
        }
        Err(e) => println!("Order failed: {e}"),
    }
}

async fn my_orders(orders: &OrderService, user_id: &str) {
    println!("\n=== My Orders ===");

    match orders.user_orders(user_id).await {
        Ok(list) if list.is_empty() => println!("No orders yet."),
        Ok(list) => {
            println!("order | product | qty | total | placed at");
            println!("{}", "-".repeat(60));
            let mut grand_total = 0.0;
            for o in &list {
                println!(
                    "{} | {} | {} | {:.0} won | {}",
                    o.id,
                    o.product_id,
                    o.quantity,
                    o.total_price,
                    o.created_at.format("%Y-%m-%d %H:%M:%S")
                );
                grand_total += o.total_price;
            }
            println!("\n{} orders, {:.0} won in total", list.len(), grand_total);
        }
        Err(e) => println!("Could not load orders: {e}"),
    }
}
