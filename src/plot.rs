use std::path::Path;

use itertools::iproduct;
use plotters::prelude::*;

use crate::signal::Signal;
use crate::spectral::{Scaling, Spectrogram, SpectrumFrame};

const DIMS: (u32, u32) = (1440, 1080);

type PlotResult = Result<(), Box<dyn std::error::Error>>;

fn value_bounds(vals: &[f32]) -> (f64, f64) {
    let lo = vals.iter().fold(f64::INFINITY, |a, &b| a.min(b as f64));
    let hi = vals.iter().fold(f64::NEG_INFINITY, |a, &b| a.max(b as f64));
    if lo < hi {
        (lo, hi)
    } else {
        // degenerate/empty data still needs a drawable range
        (lo.min(0.0), hi.max(1.0))
    }
}

/// Time-domain rendering of a conditioned signal.
pub fn waveform(fname: &Path, signal: &Signal) -> PlotResult {
    let root = BitMapBackend::new(fname, DIMS).into_drawing_area();
    root.fill(&WHITE)?;

    let mut chart = ChartBuilder::on(&root)
        .caption("Time Domain", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..signal.duration() as f64, -1.1..1.1)?;
    chart
        .configure_mesh()
        .x_desc("Time (s)")
        .y_desc("Amplitude")
        .draw()?;

    chart.draw_series(LineSeries::new(
        signal
            .time_axis()
            .iter()
            .zip(signal.samples())
            .map(|(&t, &x)| (t as f64, x as f64)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Frequency-domain line plot; serves the single spectrum and the
/// long-term average alike.
pub fn spectrum_line(fname: &Path, frame: &SpectrumFrame, title: &str) -> PlotResult {
    let root = BitMapBackend::new(fname, DIMS).into_drawing_area();
    root.fill(&WHITE)?;

    let fmax = frame.frequencies.last().copied().unwrap_or(1.0) as f64;
    let (lo, hi) = value_bounds(&frame.magnitudes);
    let ylabel = match frame.scaling {
        Scaling::Decibel => "Magnitude (dB)",
        Scaling::Linear => "Magnitude (linear)",
    };

    let mut chart = ChartBuilder::on(&root)
        .caption(title, ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..fmax, lo..hi)?;
    chart
        .configure_mesh()
        .x_desc("Frequency (Hz)")
        .y_desc(ylabel)
        .draw()?;

    chart.draw_series(LineSeries::new(
        frame
            .frequencies
            .iter()
            .zip(&frame.magnitudes)
            .map(|(&f, &m)| (f as f64, m as f64)),
        &BLUE,
    ))?;

    root.present()?;
    Ok(())
}

/// Spectrogram heatmap: one colored rectangle per (time, frequency) cell,
/// colors normalized over the full grid.
pub fn spectrogram_heatmap(fname: &Path, sg: &Spectrogram) -> PlotResult {
    let root = BitMapBackend::new(fname, DIMS).into_drawing_area();
    root.fill(&WHITE)?;

    let (nbins, ntimes) = sg.power.dim();
    let fstep = match sg.frequencies.get(1) {
        Some(&f1) => f1 as f64,
        None => 1.0,
    };
    let fmax = sg.frequencies.last().copied().unwrap_or(1.0) as f64 + fstep;
    // cell width from the column spacing; a single column gets its own width
    let tstep = match sg.times.len() {
        0 | 1 => 1.0,
        _ => (sg.times[1] - sg.times[0]) as f64,
    };
    let tmax = sg.times.last().copied().unwrap_or(0.0) as f64 + tstep;

    let mut chart = ChartBuilder::on(&root)
        .caption("Spectrogram", ("sans-serif", 30))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(0.0..tmax.max(tstep), 0.0..fmax)?;
    chart
        .configure_mesh()
        .disable_mesh()
        .x_desc("Time (s)")
        .y_desc("Frequency (Hz)")
        .draw()?;

    // normalize cell values to [0,1] for the colormap
    let (lo, hi) = value_bounds(sg.power.as_slice().unwrap_or(&[]));
    let span = (hi - lo).max(f64::MIN_POSITIVE);

    chart.draw_series(iproduct!(0..ntimes, 0..nbins).map(|(t, b)| {
        let t0 = sg.times[t] as f64 - tstep * 0.5;
        let f0 = sg.frequencies[b] as f64;
        let y = (sg.power[(b, t)] as f64 - lo) / span;
        Rectangle::new(
            [(t0, f0), (t0 + tstep, f0 + fstep)],
            VulcanoHSL::get_color(y).filled(),
        )
    }))?;

    root.present()?;
    Ok(())
}
