//! Entrypoint for CLI
use std::{env, error::Error, fs, time::Instant};

use chipvm::{constants::TIMER_FREQUENCY, prelude::*, IMPL_VERSION};
use log::{error, info, warn};

mod clock;

use self::clock::FrameClock;

static USAGE: &str = r#"
usage: chipvm run FILE [OPTIONS]

options:
    --frames N        stop after N frames (default 600)
    --steps N         instructions per frame (default 10)
    --shift-vy        shift instructions read Vy (COSMAC lineage)
    --index-carry     ADD I, Vx sets VF past the end of memory
    --jump-vx         JP V0, addr reads Vx instead of V0
    --ignore-unknown  treat unknown opcodes as no-ops
    --strict-memory   fault on out of bounds memory access
    --no-throttle     run frames as fast as possible

examples:
    chipvm run breakout.rom
    chipvm run maze.rom --frames 120 --no-throttle
"#;

struct RunOpts {
    filepath: String,
    frames: u64,
    throttle: bool,
    conf: Chip8Conf,
}

fn run_rom(opts: RunOpts) -> Chip8Result<()> {
    let rom = fs::read(&opts.filepath)?;

    let mut vm = Chip8Vm::new(opts.conf);
    vm.load_rom(rom.as_slice())?;

    info!("loaded {} byte ROM from {}", rom.len(), opts.filepath);

    // One frame is N instructions then a timer tick, at 60 Hz.
    let mut clock = FrameClock::for_frequency(TIMER_FREQUENCY);
    let start = Instant::now();
    let mut frames = 0u64;

    let outcome = loop {
        if frames >= opts.frames {
            break Ok(());
        }
        if opts.throttle {
            clock.wait();
        }

        match vm.run_frame() {
            Ok(Flow::KeyWait) => {
                // Headless host: there is no input collaborator to wake
                // the machine back up.
                warn!("program is waiting for key input, stopping");
                break Ok(());
            }
            Ok(Flow::Interrupt) => break Ok(()),
            Ok(_) => {}
            Err(err) => break Err(err),
        }

        vm.tick_timers();
        frames += 1;
    };

    let elapsed = start.elapsed();
    println!("{}", vm.dump_display()?);
    println!(
        "ran {frames} frames in {:.3}ms",
        elapsed.as_nanos() as f64 / 1_000_000.0
    );

    if let Err(err) = outcome {
        error!("{err}");
        return Err(err);
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn Error>> {
    simple_logger::SimpleLogger::new().env().init()?;

    match parse_args() {
        Some(Cmd::Run(opts)) => run_rom(opts)?,
        None => {
            print_usage();
            // FreeBSD EX_USAGE (64)
            std::process::exit(64)
        }
    }

    Ok(())
}

fn parse_args() -> Option<Cmd> {
    let mut args = env::args().skip(1);
    match args.next()?.as_str() {
        "run" => {
            let mut opts = RunOpts {
                filepath: args.next()?,
                frames: 600,
                throttle: true,
                conf: Chip8Conf::default(),
            };

            while let Some(arg) = args.next() {
                match arg.as_str() {
                    "--frames" => opts.frames = args.next()?.parse().ok()?,
                    "--steps" => opts.conf.steps_per_frame = args.next()?.parse().ok()?,
                    "--shift-vy" => opts.conf.quirks.shift_source = ShiftSource::Vy,
                    "--index-carry" => opts.conf.quirks.index_add_carry = true,
                    "--jump-vx" => opts.conf.quirks.jump_offset_vx = true,
                    "--ignore-unknown" => opts.conf.undefined_opcode = UndefinedOpcode::Ignore,
                    "--strict-memory" => opts.conf.memory_access = MemoryAccess::Fault,
                    "--no-throttle" => opts.throttle = false,
                    _ => return None,
                }
            }

            Some(Cmd::Run(opts))
        }
        _ => None,
    }
}

fn print_usage() {
    println!("chipvm v{IMPL_VERSION}");
    println!("{USAGE}");
}

enum Cmd {
    /// Run a ROM file
    Run(RunOpts),
}
