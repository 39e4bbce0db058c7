use clap::{Parser, Subcommand};
use reqwest::Client;
use serde::Deserialize;
use serde_json::json;
use std::fs;

const TOKEN_FILE: &str = ".hotelier_token";

#[derive(Parser)]
#[command(name = "hotelier-cli")]
#[command(about = "CLI for the hotelier REST API", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(short, long, default_value = "http://localhost:8080")]
    url: String,
}

#[derive(Subcommand)]
enum Commands {
    Register {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, default_value = "customer")]
        role: String,
    },
    Login {
        #[arg(short, long)]
        email: String,
        #[arg(short, long)]
        password: String,
    },
    Logout,
    ListRooms,
    Available {
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
    },
    AddRoom {
        #[arg(short, long)]
        name: String,
        #[arg(short = 't', long = "type", default_value = "standard")]
        room_type: String,
        #[arg(short, long)]
        price: f64,
        #[arg(short, long)]
        capacity: u32,
        #[arg(short = 'f', long, default_value_t = 1)]
        floor: i32,
        #[arg(short = 'r', long)]
        room_number: String,
    },
    SetAvailability {
        #[arg(short, long)]
        id: String,
        #[arg(long)]
        available: bool,
    },
    DeleteRoom {
        #[arg(short, long)]
        id: String,
    },
    Book {
        #[arg(long)]
        customer_id: String,
        #[arg(long)]
        customer_name: String,
        #[arg(long)]
        customer_email: String,
        #[arg(long)]
        room_id: String,
        #[arg(long)]
        room_name: String,
        #[arg(long)]
        check_in: String,
        #[arg(long)]
        check_out: String,
        #[arg(short, long, default_value_t = 1)]
        guests: u32,
        #[arg(long)]
        total_amount: f64,
    },
    CancelBooking {
        #[arg(short, long)]
        id: String,
    },
    MyBookings,
    ListBookings,
    Contact {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(short, long)]
        subject: String,
        #[arg(short, long)]
        message: String,
    },
    Stats,
}

#[derive(Deserialize)]
struct LoginResponse {
    token: String,
}

fn token() -> String {
    fs::read_to_string(TOKEN_FILE).unwrap_or_default()
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let client = Client::new();

    match cli.command {
        Commands::Register { email, password, name, role } => {
            let res = client
                .post(format!("{}/register", cli.url))
                .json(&json!({ "email": email, "password": password, "name": name, "role": role }))
                .send()
                .await?;
            if res.status().is_success() {
                let body: LoginResponse = res.json().await?;
                fs::write(TOKEN_FILE, body.token)?;
                println!("Registered and logged in. Token saved to {TOKEN_FILE}");
            } else {
                println!("Registration failed: {}", res.text().await?);
            }
        }
        Commands::Login { email, password } => {
            let res = client
                .post(format!("{}/login", cli.url))
                .json(&json!({ "email": email, "password": password }))
                .send()
                .await?;
            if res.status().is_success() {
                let body: LoginResponse = res.json().await?;
                fs::write(TOKEN_FILE, body.token)?;
                println!("Logged in. Token saved to {TOKEN_FILE}");
            } else {
                println!("Login failed: {}", res.text().await?);
            }
        }
        Commands::Logout => {
            let _ = client
                .post(format!("{}/logout", cli.url))
                .send()
                .await;
            let _ = fs::remove_file(TOKEN_FILE);
            println!("Logged out (token removed).");
        }
        Commands::ListRooms => {
            let res = client.get(format!("{}/rooms", cli.url)).send().await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Available { check_in, check_out } => {
            let res = client
                .get(format!(
                    "{}/rooms/available?check_in={}&check_out={}",
                    cli.url, check_in, check_out
                ))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::AddRoom { name, room_type, price, capacity, floor, room_number } => {
            let res = client
                .post(format!("{}/rooms", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .json(&json!({
                    "id": "",
                    "name": name,
                    "type": room_type,
                    "price": price,
                    "capacity": capacity,
                    "amenities": [],
                    "images": [],
                    "description": "",
                    "isAvailable": true,
                    "floor": floor,
                    "roomNumber": room_number
                }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::SetAvailability { id, available } => {
            let res = client
                .patch(format!("{}/rooms/{}", cli.url, id))
                .header("Authorization", format!("Bearer {}", token()))
                .json(&json!({ "isAvailable": available }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::DeleteRoom { id } => {
            let res = client
                .delete(format!("{}/rooms/{}", cli.url, id))
                .header("Authorization", format!("Bearer {}", token()))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Book {
            customer_id,
            customer_name,
            customer_email,
            room_id,
            room_name,
            check_in,
            check_out,
            guests,
            total_amount,
        } => {
            let res = client
                .post(format!("{}/bookings", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .json(&json!({
                    "customerId": customer_id,
                    "customerName": customer_name,
                    "customerEmail": customer_email,
                    "roomId": room_id,
                    "roomName": room_name,
                    "checkIn": check_in,
                    "checkOut": check_out,
                    "guests": guests,
                    "totalAmount": total_amount,
                    "status": "confirmed",
                    "paymentStatus": "pending"
                }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::CancelBooking { id } => {
            let res = client
                .post(format!("{}/bookings/{}/cancel", cli.url, id))
                .header("Authorization", format!("Bearer {}", token()))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::MyBookings => {
            let res = client
                .get(format!("{}/bookings/mine", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::ListBookings => {
            let res = client
                .get(format!("{}/bookings", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Contact { name, email, subject, message } => {
            let res = client
                .post(format!("{}/contact", cli.url))
                .json(&json!({
                    "customerName": name,
                    "customerEmail": email,
                    "subject": subject,
                    "message": message
                }))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
        Commands::Stats => {
            let res = client
                .get(format!("{}/stats", cli.url))
                .header("Authorization", format!("Bearer {}", token()))
                .send()
                .await?;
            println!("Response: {}", res.text().await?);
        }
    }

    Ok(())
}
