// End-to-end capture over a simulated GPIO register bank.
//
// Drives the named endpoint surface the way a transport layer would:
// configure the sample count, trigger a capture, then page the data out.

use clap::Parser;
use pinscope_rs::{Attribute, DeviceEndpoints, FnSource};

#[derive(Parser, Debug)]
#[command(about = "Simulated logic-sampler capture")]
struct Args {
    /// Number of samples to capture
    #[arg(short, long, default_value_t = 256)]
    samples: usize,

    /// Record a timestamp after every poll
    #[arg(short, long)]
    accurate: bool,

    /// Toggle period of the simulated square wave, in polls
    #[arg(short, long, default_value_t = 8)]
    period: u32,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let args = Args::parse();

    println!("Pinscope Simulated Capture");
    println!("==========================\n");

    // Two lines carrying complementary square waves.
    let period = args.period.max(1);
    let mut tick = 0u32;
    let source = FnSource::new(move || {
        tick = tick.wrapping_add(1);
        if (tick / period) % 2 == 0 {
            0b01
        } else {
            0b10
        }
    });

    let mut device = DeviceEndpoints::new(source);
    device.session_mut().config_mut().set_one_shot(false);

    let body = format!("{}\n", args.samples);
    device.write(Attribute::SampleSize, &body);
    println!(
        "Requested sample count: {}",
        device.read(Attribute::SampleSize).trim()
    );

    let trigger = if args.accurate {
        Attribute::TriggerAccurate
    } else {
        Attribute::TriggerFast
    };
    print!("Triggering {}... {}", trigger, device.read(trigger));
    println!(
        "Capture took {} ns\n",
        device.read(Attribute::ReadTime).trim()
    );

    let data_attr = if args.accurate {
        Attribute::ReadData
    } else {
        Attribute::ReadDataFast
    };

    let mut pages = 0;
    loop {
        let page = device.read(data_attr);
        if page == "No data\n" || page.trim_end_matches('\n').is_empty() {
            break;
        }
        pages += 1;
        println!("--- page {} ({} bytes) ---", pages, page.len());
        print!("{}", page);
    }

    println!(
        "\nDrained in {} pages, {} samples remaining",
        pages,
        device.read(Attribute::DataRemaining).trim()
    );
    Ok(())
}
