use std::path::PathBuf;
use anyhow::Context;
use log::info;
use structopt::StructOpt;
use vdspiral::{ integrate, io, waveform };
use lib::{ logger, params };

// design a variable-density spiral from a parameter file and write its
// gradient waveform as raw binary

#[derive(Debug, StructOpt)]
#[structopt(name = "vds", about = "Variable-density spiral gradient design")]
struct Opt {
    /// TOML file holding the design parameters
    #[structopt(short, long, parse(from_os_str))]
    params: PathBuf,

    /// Output file for the raw gradient waveform (gx then gy, as f64)
    #[structopt(short, long, parse(from_os_str), default_value = "vds.out")]
    output: PathBuf,

    /// Also write every rotated interleave (gx then gy per interleave) here
    #[structopt(long, parse(from_os_str))]
    interleaves_out: Option<PathBuf>,

    /// Increase log verbosity (repeat for more)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: u8,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    logger::init(logger::level_from_verbosity(opt.verbose))?;

    let params = params::load(&opt.params)
        .with_context(|| format!("loading {}", opt.params.display()))?;
    info!("designing with {:?}", params);

    let spiral = integrate::calc_vds(&params)?;
    let (sx, sy) = spiral.slew();
    let gmag = waveform::magnitude(spiral.gx(), spiral.gy())?;
    let smag = waveform::magnitude(&sx, &sy)?;
    info!(
        "peak gradient {:.4} G/cm, peak slew {:.1} G/cm/s",
        waveform::peak(&gmag).unwrap_or(0.0),
        waveform::peak(&smag).unwrap_or(0.0),
    );

    io::write_raw(&opt.output, spiral.gx(), spiral.gy())
        .with_context(|| format!("writing {}", opt.output.display()))?;

    if let Some(path) = opt.interleaves_out.as_ref() {
        let all = spiral.interleaves(params.interleaves);
        let mut buf: Vec<u8> = Vec::new();
        for row in all.rows() {
            let gx = row.mapv(|g| g.re);
            let gy = row.mapv(|g| g.im);
            io::write_raw_to(&gx, &gy, &mut buf)?;
        }
        std::fs::write(path, buf)
            .with_context(|| format!("writing {}", path.display()))?;
    }

    println!("{} gradient samples", spiral.len());
    println!(
        "final radius {:.6} cm^-1 ({})",
        spiral.final_radius(),
        if spiral.is_complete() { "complete" } else { "truncated" },
    );
    if spiral.degenerate_steps() > 0 {
        println!(
            "{} steps used the real part of a complex root",
            spiral.degenerate_steps(),
        );
    }
    Ok(())
}
