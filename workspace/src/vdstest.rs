use vdspiral::{ integrate, io };

// reference design: 40 interleaves, 24 cm FOV, 1 mm resolution, 1 us gradient
// sampling; written to `vdstest` as raw binary

const SLEW_MAX: f64 = 15000.0; // G/cm/s
const GRAD_MAX: f64 = 4.0; // G/cm
const GRAD_DT: f64 = 1e-6; // s
const DATA_DT: f64 = 4e-6; // s
const INTERLEAVES: usize = 40;
const FOV: [f64; 1] = [24.0]; // cm
const MAX_RADIUS: f64 = 5.0; // cm^-1
const MAX_SAMPLES: usize = 1_000_000;

fn main() -> anyhow::Result<()> {
    println!("Calculating waveform.");
    let (gx, gy) = integrate::calc_vds_raw(
        SLEW_MAX,
        GRAD_MAX,
        GRAD_DT,
        DATA_DT,
        INTERLEAVES,
        &FOV,
        MAX_RADIUS,
        MAX_SAMPLES,
    )?;
    println!("{} gradient samples", gx.len());
    io::write_raw("vdstest", &gx, &gy)?;
    Ok(())
}
