//! Command-line trainer for the XOR toy problem.
//!
//! Builds a network from `--layers`, trains it online on the four XOR
//! examples for the requested number of iterations, then reports thresholded
//! predictions and timing. `--json` swaps the human-readable report for a
//! machine-readable run summary on stdout.

use std::env;
use std::io::{self, Write};
use std::process;
use std::time::Instant;

use rand::prelude::*;
use serde::Serialize;

use magnetite_nn::{evaluate, train_epoch, Network, NetworkSpec};

const DEFAULT_LAYERS: &str = "2,2,1";
const DEFAULT_ITERATIONS: usize = 10_000;
const DEFAULT_LEARNING_RATE: f64 = 0.1;
const DISPLAY_INTERVAL: usize = 1_000;

/// The four XOR examples: 2 inputs, 1 output.
fn xor_dataset() -> (Vec<Vec<f64>>, Vec<Vec<f64>>) {
    let inputs = vec![
        vec![0.0, 0.0],
        vec![0.0, 1.0],
        vec![1.0, 0.0],
        vec![1.0, 1.0],
    ];
    let targets = vec![vec![0.0], vec![1.0], vec![1.0], vec![0.0]];
    (inputs, targets)
}

struct CliOptions {
    spec: NetworkSpec,
    iterations: usize,
    learning_rate: f64,
    seed: Option<u64>,
    json: bool,
}

#[derive(Serialize)]
struct PredictionRecord {
    input: Vec<f64>,
    output: Vec<f64>,
    expected: Vec<f64>,
    predicted: Vec<u8>,
}

#[derive(Serialize)]
struct RunSummary {
    layers: Vec<usize>,
    learning_rate: f64,
    iterations: usize,
    seed: u64,
    final_loss: f64,
    passed: usize,
    total: usize,
    elapsed_ms: u64,
    predictions: Vec<PredictionRecord>,
}

fn print_usage(program: &str) {
    println!("Neural Network Trainer");
    println!();
    println!("USAGE:");
    println!("  {program} [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("  {:<26} {}", "-h, --help", "Show this help message");
    println!("  {:<26} {}", "--layers VALUE", "Network architecture (comma-separated sizes)");
    println!("  {:<26} {}", "-i, --iterations N", "Number of training iterations");
    println!("  {:<26} {}", "-s, --seed VALUE", "Random seed for reproducibility");
    println!("  {:<26} {}", "-lr, --learning-rate R", "Learning rate");
    println!("  {:<26} {}", "--json", "Print the run summary as JSON");
    println!();
    println!("EXAMPLES:");
    println!("  {program} --layers 2,4,3,1 --iterations 5000");
    println!("  {program} --layers 2,8,8,1 --learning-rate 0.05 --seed 12345");
    println!();
    println!("DEFAULTS:");
    println!("  {:<26} {}", "Network layers:", DEFAULT_LAYERS);
    println!("  {:<26} {}", "Iterations:", DEFAULT_ITERATIONS);
    println!("  {:<26} {}", "Learning rate:", DEFAULT_LEARNING_RATE);
    println!("  {:<26} {}", "Seed:", "random (entropy-based)");
}

/// Parses the argument list. `Ok(None)` means help was requested.
fn parse_args(args: &[String]) -> Result<Option<CliOptions>, String> {
    let mut layers_text = DEFAULT_LAYERS.to_string();
    let mut iterations = DEFAULT_ITERATIONS;
    let mut learning_rate = DEFAULT_LEARNING_RATE;
    let mut seed = None;
    let mut json = false;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "-h" | "--help" => return Ok(None),
            "--layers" => {
                i += 1;
                layers_text = take_value(args, i, "--layers")?.to_string();
            }
            "-i" | "--iterations" => {
                i += 1;
                let value = take_value(args, i, "--iterations")?;
                iterations = value
                    .parse()
                    .map_err(|_| format!("invalid iteration count '{value}'"))?;
            }
            "-s" | "--seed" => {
                i += 1;
                let value = take_value(args, i, "--seed")?;
                seed = Some(
                    value
                        .parse()
                        .map_err(|_| format!("invalid seed '{value}'"))?,
                );
            }
            "-lr" | "--learning-rate" => {
                i += 1;
                let value = take_value(args, i, "--learning-rate")?;
                learning_rate = value
                    .parse()
                    .map_err(|_| format!("invalid learning rate '{value}'"))?;
                if learning_rate <= 0.0 {
                    return Err(format!("learning rate must be positive, got {learning_rate}"));
                }
            }
            "--json" => json = true,
            other => return Err(format!("unknown option '{other}'")),
        }
        i += 1;
    }

    let spec = NetworkSpec::parse(&layers_text).map_err(|err| err.to_string())?;
    Ok(Some(CliOptions {
        spec,
        iterations,
        learning_rate,
        seed,
        json,
    }))
}

fn take_value<'a>(args: &'a [String], i: usize, flag: &str) -> Result<&'a str, String> {
    args.get(i)
        .map(String::as_str)
        .ok_or_else(|| format!("missing value for {flag}"))
}

fn format_outputs(values: &[f64]) -> String {
    let cells: Vec<String> = values.iter().map(|v| format!("{v:.6}")).collect();
    format!("[{}]", cells.join(", "))
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let program = args
        .first()
        .map(String::as_str)
        .unwrap_or("magnetite-nn")
        .to_string();
    let name = program.rsplit('/').next().unwrap_or(&program);

    let options = match parse_args(args.get(1..).unwrap_or_default()) {
        Ok(Some(options)) => options,
        Ok(None) => {
            print_usage(name);
            return;
        }
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage(name);
            process::exit(1);
        }
    };

    let seed = options.seed.unwrap_or_else(|| thread_rng().gen());
    let mut rng = StdRng::seed_from_u64(seed);
    let (inputs, targets) = xor_dataset();

    if !options.json {
        println!("Neural network configuration:");
        let sizes: Vec<String> = options
            .spec
            .layer_sizes()
            .iter()
            .map(usize::to_string)
            .collect();
        println!("Layers: {}", sizes.join("->"));
        println!("Learning rate: {:.3}", options.learning_rate);
        println!("Training iterations: {}", options.iterations);
        match options.seed {
            Some(_) => println!("Using provided seed: {seed}"),
            None => println!("Using random seed: {seed}"),
        }
    }

    let started = Instant::now();
    let mut network = Network::new(&options.spec, options.learning_rate, &mut rng);

    if !options.json {
        println!("Training neural network...");
    }
    for iteration in 0..options.iterations {
        if let Err(error) = train_epoch(&mut network, &inputs, &targets) {
            eprintln!("\nError: training failed: {error}");
            process::exit(1);
        }
        if !options.json && iteration % DISPLAY_INTERVAL == 0 {
            print!(
                "\rTraining progress: {:6.2}% complete",
                100.0 * iteration as f64 / options.iterations as f64
            );
            let _ = io::stdout().flush();
        }
    }
    if !options.json {
        println!("\rTraining progress: 100.00% complete");
        println!("\nTesting neural network:");
    }

    let mut passed = 0;
    let mut total = 0;
    let mut records = Vec::with_capacity(inputs.len());
    for (input, expected) in inputs.iter().zip(targets.iter()) {
        let output = match network.predict(input) {
            Ok(output) => output,
            Err(error) => {
                eprintln!("Error: prediction failed: {error}");
                process::exit(1);
            }
        };
        let predicted: Vec<u8> = output.iter().map(|&v| u8::from(v >= 0.5)).collect();
        for (p, e) in predicted.iter().zip(expected.iter()) {
            total += 1;
            if *p == u8::from(*e >= 0.5) {
                passed += 1;
            }
        }
        if !options.json {
            println!(
                "Input: {:?}, Output: {}, Expected: {:?}, Predicted: {:?}",
                input,
                format_outputs(&output),
                expected,
                predicted
            );
        }
        records.push(PredictionRecord {
            input: input.clone(),
            output,
            expected: expected.clone(),
            predicted,
        });
    }

    let final_loss = match evaluate(&network, &inputs, &targets) {
        Ok(loss) => loss,
        Err(error) => {
            eprintln!("Error: evaluation failed: {error}");
            process::exit(1);
        }
    };
    let elapsed = started.elapsed();

    if options.json {
        let summary = RunSummary {
            layers: options.spec.layer_sizes().to_vec(),
            learning_rate: options.learning_rate,
            iterations: options.iterations,
            seed,
            final_loss,
            passed,
            total,
            elapsed_ms: elapsed.as_millis() as u64,
            predictions: records,
        };
        match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{json}"),
            Err(error) => {
                eprintln!("Error: could not serialize run summary: {error}");
                process::exit(1);
            }
        }
    } else {
        println!("Predicted {passed} out of {total} cases correctly.");
        println!("Final mean squared error: {final_loss:.6}");
        println!("\nApp took {:.3} seconds to run", elapsed.as_secs_f64());
    }
}
