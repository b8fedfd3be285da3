// flexipool - demo binary
// The library lives in lib.rs; run the example with: cargo run --example basic

use flexipool::{Pool, PoolConfig};
use tracing::Level;

fn main() {
    tracing_subscriber::fmt().with_max_level(Level::DEBUG).init();

    println!("=== flexipool ===");
    println!("Run: cargo run --example basic");
    println!();

    println!("Quick Demo:");
    let mut pool = Pool::new(|| [0u8; 16], PoolConfig::new().with_debug(true));

    let leases: Vec<_> = (0..3).filter_map(|_| pool.get()).collect();
    println!("  Leased {} objects, pool size is now {}", leases.len(), pool.size());

    for lease in leases {
        pool.release(lease);
    }
    println!("  Available after return: {}", pool.available());
}
