// Paging semantics walkthrough using the session API directly.
//
// Shows the read-once cursor, the page byte budget, and the "No data"
// sentinel after a full drain.

use pinscope_rs::{CaptureMode, CaptureSession, RenderFormat, SequenceSource};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    println!("Pinscope Paged Readout Example");
    println!("==============================\n");

    // A walking-ones pattern across the low byte.
    let pattern: Vec<u32> = (0..8).map(|bit| 1 << bit).collect();
    let mut session = CaptureSession::new(SequenceSource::new(pattern)?);
    session.config_mut().set_sample_count(300)?;

    println!("1. Fast capture of 300 samples");
    let result = session.trigger(CaptureMode::Fast);
    println!(
        "   {} samples in {} ns\n",
        result.samples_written, result.elapsed_ns
    );

    println!("2. Draining in compact pages (1024-byte ceiling)");
    let mut page_number = 0;
    loop {
        let page = session.next_page(RenderFormat::Compact);
        if page.samples_consumed == 0 {
            break;
        }
        page_number += 1;
        println!(
            "   page {}: {} samples, {} bytes, {} remaining",
            page_number,
            page.samples_consumed,
            page.text.len(),
            session.remaining()
        );
    }

    println!("\n3. Buffer after drain");
    let sentinel = session.next_page(RenderFormat::Compact);
    println!("   next_page returns {:?}", sentinel.text);
    println!("   remaining() == {}", session.remaining());
    println!("   elapsed_ns() still reports {} ns", session.elapsed_ns());

    println!("\n4. Accurate capture, timestamped CSV readout");
    session.config_mut().set_sample_count(4)?;
    session.trigger(CaptureMode::Accurate);
    let page = session.next_page(RenderFormat::TimestampedCsv);
    print!("{}", page.text);

    println!("\nPaged readout example completed!");
    Ok(())
}
