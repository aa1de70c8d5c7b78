// demos/basic_usage.rs
//! Basic usage example of cursors, spans and buffers

use cursorbuf::prelude::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    println!("=== Basic Buffer Usage ===\n");

    let mut buf = Buffer::new();

    // Mixed widths and byte orders
    buf.write_u32_be(12345)?;
    buf.write_u24_le(0x0A0B0C)?;
    buf.write_i16_be(-2)?;
    buf.write_f64_le(std::f64::consts::PI)?;
    buf.write_string("Hello, World!")?;

    println!("Unread bytes: {}", buf.len());
    println!("Position: {}", buf.position());

    println!("Read u32 (BE): {}", buf.read_u32_be()?);
    println!("Read u24 (LE): 0x{:06X}", buf.read_u24_le()?);
    println!("Read i16 (BE): {}", buf.read_i16_be()?);
    println!("Read f64 (LE): {}", buf.read_f64_le()?);
    println!("Read string: {:?}", buf.read_string(13)?);

    println!("\n=== Varints ===\n");

    let mut compact = Buffer::new();
    let mut fixed = Buffer::with_config(BufferConfig::fixed_window());
    for v in [1u64, 300, 1 << 40] {
        compact.write_uvarint(v)?;
        fixed.write_uvarint(v)?;
    }
    println!("Compact layout: {} bytes", compact.stored());
    println!("Fixed window:   {} bytes", fixed.stored());
    while !compact.is_empty() {
        println!("  {} == {}", compact.read_uvarint()?, fixed.read_uvarint()?);
    }

    println!("\n=== Cursor and Spans ===\n");

    let mut cursor = Cursor::new("name = \"cursorbuf\"".chars().collect::<Vec<_>>());
    cursor.skip_to(&'"')?;
    let start = cursor.position();
    let len = cursor.till(&'"')?.len();
    let span = Span::new(cursor.snapshot_at(start)?, cursor.snapshot_at(start + len - 1)?);
    println!("Quoted value: {}", span);

    cursor.last_take()?;
    println!("Position after undo: {}", cursor.position());

    println!("\n=== Buffer Pool Usage ===\n");

    let pool = BufferPool::new(PoolConfig {
        buffer: BufferConfig::bounded(4096),
        max_pool_size: 50,
        min_pool_size: 5,
    });

    println!("Initial pool size: {}", pool.available());
    {
        let mut pooled = pool.acquire();
        pooled.write_line("pooled data")?;
        println!("Pooled buffer read: {:?}", pooled.read_line()?);
        println!("Pool size while borrowed: {}", pool.available());
    }
    println!("Pool size after return: {}", pool.available());

    let stats = pool.stats();
    println!(
        "Acquired: {}, returned: {}, hit rate: {:.1}%",
        stats.acquired,
        stats.returned,
        stats.hit_rate()
    );

    Ok(())
}
