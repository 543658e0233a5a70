//! Product menu: list, detail, search.

use crate::cli::input;
use crate::model::ProductId;
use crate::service::ProductService;

pub(super) async fn run(products: &ProductService) {
    loop {
        println!("\n=== Product Menu ===");
        println!("1. List all products");
        println!("2. Product detail");
        println!("3. Search by name");
        println!("4. Filter by price range");
        println!("0. Back");

        match input::prompt("Select: ").as_str() {
            "1" => list_all(products).await,
            "2" => detail(products).await,
            "3" => search(products).await,
            "4" => price_range(products).await,
            "0" => return,
            _ => println!("Invalid selection, try again."),
        }
    }
}

fn print_table(products: &[crate::model::Product]) {
    println!("id | name | price | stock");
    println!("{}", "-".repeat(40));
    for p in products {
        println!("{} | {} | {:.0} won | {}", p.id, p.name, p.price, p.stock);
    }
}

async fn list_all(products: &ProductService) {
    println!("\n=== Products ===");
    match products.all_products().await {
        Ok(list) => {
            print_table(&list);
            println!("\n{} products in the catalog.", list.len());
        }
        Err(e) => println!("Could not load the catalog: {e}"),
    }
}

async fn detail(products: &ProductService) {
    let Some(id) = input::parse_u32(&input::prompt("Product id: ")) else {
        println!("Enter a valid number.");
        return;
    };

    match products.get_product(ProductId(id)).await {
        Ok(p) => {
            println!("\n=== Product Detail ===");
            println!("Id:    {}", p.id);
            println!("Name:  {}", p.name);
            println!("Price: {:.0} won", p.price);
            println!("Stock: {}", p.stock);
            println!(
                "State: {}",
                if p.in_stock() { "available" } else { "sold out" }
            );
        }
        Err(e) => println!("{e}"),
    }
}

async fn search(products: &ProductService) {
    let keyword = input::prompt("Keyword: ");
    match products.search_by_name(&keyword).await {
        Ok(list) if list.is_empty() => println!("No products match '{keyword}'."),
        Ok(list) => print_table(&list),
        Err(e) => println!("Search failed: {e}"),
    }
}

async fn price_range(products: &ProductService) {
    let Some(min) = input::parse_positive_amount(&input::prompt("Minimum price: ")) else {
        println!("Enter a positive amount.");
        return;
    };
    let Some(max) = input::parse_positive_amount(&input::prompt("Maximum price: ")) else {
        println!("Enter a positive amount.");
        return;
    };

    match products.by_price_range(min, max).await {
        Ok(list) if list.is_empty() => println!("No products in that range."),
        Ok(list) => print_table(&list),
        Err(e) => println!("Filter failed: {e}"),
    }
}
