//! Basic usage examples for Pool

use flexipool::{Pool, PoolConfig, PoolConfigUpdate, Reset, ResetError, Resetting};

#[derive(Debug, Default)]
struct Particle {
    position: (f32, f32),
    velocity: (f32, f32),
    age: u32,
}

impl Reset for Particle {
    fn reset(&mut self) -> Result<(), ResetError> {
        *self = Particle::default();
        Ok(())
    }
}

fn main() {
    tracing_subscriber::fmt().init();

    println!("=== flexipool - Basic Examples ===\n");

    // Example 1: Simple pool
    simple_pool();

    // Example 2: Resetting objects on release
    resetting_pool();

    // Example 3: Bounded pool with recycling
    recycling_pool();

    // Example 4: Metrics and health
    metrics_and_health();
}

fn simple_pool() {
    println!("1. Simple Pool:");
    let mut pool = Pool::new(|| vec![0u8; 32], PoolConfig::default());

    let lease = pool.get().unwrap();
    println!("   Got buffer of {} bytes", pool.item(&lease).unwrap().len());
    pool.release(lease);

    println!("   Size: {}, available after return: {}\n", pool.size(), pool.available());
}

fn resetting_pool() {
    println!("2. Resetting Pool:");
    let mut pool = Pool::new(Resetting(Particle::default), PoolConfig::new().with_min(4));

    let lease = pool.get().unwrap();
    if let Some(particle) = pool.item_mut(&lease) {
        particle.position = (1.0, 2.0);
        particle.velocity = (0.5, 0.0);
        particle.age = 12;
    }
    pool.release(lease);

    let lease = pool.get().unwrap();
    println!("   Reused particle: {:?}\n", pool.item(&lease).unwrap());
    pool.release(lease);
}

fn recycling_pool() {
    println!("3. Recycling Pool:");
    let config = PoolConfig::new().with_min(2).with_max(3).with_recycle(true);
    let mut pool = Pool::new(Resetting(Particle::default), config);

    let first = pool.get().unwrap();
    let _second = pool.get().unwrap();
    let _third = pool.get().unwrap();
    println!("   Saturated: at_max = {}, available = {}", pool.at_max(), pool.available());

    // The oldest lease is reclaimed to serve this request
    let _fourth = pool.get().unwrap();
    println!("   First lease still valid: {}", pool.contains(&first));

    pool.set_config(PoolConfigUpdate::new().recycle(false));
    println!("   Without recycling: {:?}\n", pool.try_get());
}

fn metrics_and_health() {
    println!("4. Metrics and Health:");
    let mut pool = Pool::new(|| 0u64, PoolConfig::new().with_max(10));

    let leases: Vec<_> = (0..9).filter_map(|_| pool.get()).collect();
    let health = pool.health();
    println!("   Health: {}", if health.is_healthy { "Healthy" } else { "Unhealthy" });
    println!("   Utilization: {:.1}%", health.utilization * 100.0);
    println!("   Used: {}, Available: {}", health.used, health.available);

    for lease in leases {
        pool.release(lease);
    }

    let metrics = pool.export_metrics();
    println!("\n   Metrics:");
    let mut keys: Vec<_> = metrics.keys().collect();
    keys.sort();
    for key in keys {
        println!("     {}: {}", key, metrics[key]);
    }
}
