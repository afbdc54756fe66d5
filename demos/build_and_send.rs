//! Build a request step by step, inspect it, then send it.
//!
//! Hits the public **httpbin** service (<https://httpbin.org>), which
//! echoes the request back, to show:
//!
//! - chained builder calls and `values()`
//! - inspecting a built `Request`
//! - sending with a configured `Client`
//! - `error_for_status()`
//!
//! Run with:
//! ```text
//! cargo run --example build_and_send
//! ```

use reqforge::{Client, RequestBuilder};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ---------------------------------------------------------------
    // 1. Assemble a request and look at it before sending
    // ---------------------------------------------------------------
    println!("=== 1. build() ===\n");

    let mut rb = RequestBuilder::new();
    rb.method("POST")
        .scheme("https")
        .host("httpbin.org")
        .path("/post")
        .user_password("diego", "dirtysecret")
        .set_value("name", "diego")
        .add_value("pet", "simona")
        .add_value("pet", "lola")
        .set_header("X-My-Header", "HI")
        .add_header("Accept", "application/json")
        .payload("DIEGO");

    println!("values(): {}", rb.values());
    let req = rb.build()?;
    println!("{} {}", req.method(), req.url());
    for (name, value) in req.headers() {
        println!("  {name}: {value:?}");
    }
    println!();

    // ---------------------------------------------------------------
    // 2. Send it with a configured client
    // ---------------------------------------------------------------
    println!("=== 2. send_with() ===\n");

    let client = Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent("reqforge-demo/0.1")
        .build()?;

    let resp = rb.send_with(&client)?;
    println!("Status:         {}", resp.status());
    println!("Version:        {:?}", resp.version());
    println!("Content-Length: {:?}", resp.content_length());

    println!("{}", resp.text()?);
    println!();

    // ---------------------------------------------------------------
    // 3. error_for_status() -- turn 4xx/5xx into Err
    // ---------------------------------------------------------------
    println!("=== 3. error_for_status() on 404 ===\n");

    let result = RequestBuilder::new()
        .scheme("https")
        .host("httpbin.org")
        .path("/status/404")
        .send_with(&client)?
        .error_for_status();

    match result {
        Ok(_) => println!("Unexpected success!"),
        Err(e) => {
            println!("Got expected error: {e}");
            println!("  is_status(): {}", e.is_status());
            println!("  status():    {:?}", e.status());
        }
    }

    println!("\nDone!");
    Ok(())
}
