use std::env;
use std::path::Path;

use log::info;

use ltas::fileio::read_wav;
use ltas::plot;
use ltas::{analyze, AnalysisConfig, Signal};

const HELP: &str = "usage: ltas [input wav] [output dir]";

fn main() {
    env_logger::init();

    // handle input args
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("{}", HELP);
        return;
    }
    let wav_in = Path::new(&args[1]);
    let out_dir = Path::new(&args[2]);

    let (fs, channels) = read_wav(wav_in).expect("couldn't decode input wav");
    let signal = Signal::condition(&channels, fs).expect("input signal is degenerate");
    info!(
        "conditioned signal: {} samples at {} Hz ({:.2} s)",
        signal.len(),
        fs,
        signal.duration()
    );

    let cfg = AnalysisConfig::default();
    let out = analyze(&signal, &cfg).expect("spectral analysis failed");

    plot::waveform(&out_dir.join("waveform.png"), &signal).expect("waveform plot failed");
    plot::spectrum_line(
        &out_dir.join("spectrum.png"),
        &out.spectrum,
        "Frequency Domain",
    )
    .expect("spectrum plot failed");
    plot::spectrogram_heatmap(&out_dir.join("spectrogram.png"), &out.spectrogram)
        .expect("spectrogram plot failed");
    plot::spectrum_line(
        &out_dir.join("long_term.png"),
        &out.long_term,
        "Long-Term Average Spectrum",
    )
    .expect("long-term spectrum plot failed");

    info!("wrote 4 plots to {}", out_dir.display());
}
