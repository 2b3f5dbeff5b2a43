//! Example sending a frame through simulated hardware and receiving it

use tinyrf_core::{
    config::LinkConfig,
    encoder::pulse_edges,
    sim::{RecordingPin, SimHardware, SimTimeline},
    Link, Receiver,
};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("TinyRF Loopback Example\n");

    let config = LinkConfig::DEFAULT.with_repeat_count(5).check();
    let frame = *b"HELLO";

    // Step 1: transmit
    println!(
        "Step 1: Transmitting {:?} x{}...",
        std::str::from_utf8(&frame)?,
        config.repeat_count
    );
    let timeline = SimTimeline::new();
    let mut tx = Link::new(SimHardware::new(&timeline), config)
        .with_transmitter::<_, 5>(RecordingPin::new(&timeline));
    let settings = tx.initialize()?;
    println!(
        "Timer: {:?}, compare {}, {} ns per tick",
        settings.prescaler,
        settings.compare,
        settings.pulse_width_ns(config.clock_hz)
    );
    tx.send(&frame)?;

    let pulses = timeline.pulses();
    println!(
        "Emitted {} pulses over {} ticks\n",
        pulses.len(),
        timeline.now()
    );

    // Step 2: receive
    println!("Step 2: Receiving...");
    let rx = Receiver::<5>::new(config.tolerances());
    let (mut isr, slot) = rx.split().ok_or("receiver already split")?;
    let mut rx_link = Link::new(SimHardware::new(&timeline), config).with_receiver(slot);
    rx_link.initialize()?;

    for event in pulse_edges(pulses, 0) {
        isr.on_edge(event);
    }

    match rx_link.read_frame() {
        Some(received) => {
            println!("Received: {:?}", String::from_utf8_lossy(&received));
            rx_link.reset();
        }
        None => println!("No frame received (state {:?})", rx.state()),
    }

    Ok(())
}
