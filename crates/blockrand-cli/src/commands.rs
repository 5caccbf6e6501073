use anyhow::Result;
use tracing::{info, info_span};

use blockrand_cli::pipeline::{generate, lay_out, render};
use blockrand_cli::summary::{print_saved, print_schedule};
use blockrand_model::config::{DEFAULT_MULTIPLIER, DEFAULT_TREATMENTS};
use blockrand_model::{ModelError, RandomizationConfig, letter_labels, multiplier_for_block_size};
use blockrand_render::{OutputFormat, RenderOptions};

use crate::cli::{Cli, OutputArgs, OutputFormatArg, RandomizationArgs};

pub fn run(cli: &Cli) -> Result<()> {
    let span = info_span!("randomize");
    let _guard = span.enter();

    let config = randomization_config(&cli.randomization)?;
    let schedule = generate(&config, cli.randomization.seed)?;
    let layout = lay_out(&schedule);
    print_schedule(&layout.records, &schedule.summary);

    let options = render_options(&cli.output);
    let saved = render(&layout.grid, &options)?;
    print_saved(&saved);
    info!(files = saved.files.len(), "randomization complete");
    Ok(())
}

/// Resolve the treatment labels and block multiplier from the flags.
pub fn randomization_config(
    args: &RandomizationArgs,
) -> std::result::Result<RandomizationConfig, ModelError> {
    let treatments = match args.arms {
        Some(arms) => letter_labels(arms)?,
        None if args.treatments.is_empty() => {
            DEFAULT_TREATMENTS.iter().map(ToString::to_string).collect()
        }
        None => args.treatments.clone(),
    };
    let multiplier = match (args.block_size, args.multiplier) {
        (Some(block_size), _) => multiplier_for_block_size(block_size, treatments.len())?,
        (None, Some(multiplier)) => multiplier,
        (None, None) => DEFAULT_MULTIPLIER,
    };
    let config = RandomizationConfig::default()
        .with_target(args.target)
        .with_treatments(treatments)
        .with_multiplier(multiplier)
        .with_block_prefix(args.block_prefix.clone());
    config.validate()?;
    Ok(config)
}

pub fn render_options(args: &OutputArgs) -> RenderOptions {
    let formats = match args.format {
        OutputFormatArg::Png => vec![OutputFormat::Png],
        OutputFormatArg::Svg => vec![OutputFormat::Svg],
        OutputFormatArg::Both => vec![OutputFormat::Png, OutputFormat::Svg],
    };
    RenderOptions {
        output_dir: args.output_dir.clone(),
        basename: args.basename.clone(),
        dpi: args.dpi,
        formats,
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["blockrand"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).expect("valid arguments")
    }

    #[test]
    fn defaults_match_two_arm_trial() {
        let cli = parse(&[]);
        let config = randomization_config(&cli.randomization).unwrap();
        assert_eq!(config.target, 30);
        assert_eq!(config.treatments, vec!["Treatment", "Control"]);
        assert_eq!(config.block_size(), 10);
        assert_eq!(config.block_prefix, "Block ");
        assert_eq!(cli.randomization.seed, None);

        let options = render_options(&cli.output);
        assert_eq!(options.output_dir.to_str(), Some("plots"));
        assert_eq!(options.formats, vec![OutputFormat::Png, OutputFormat::Svg]);
    }

    #[test]
    fn repeated_treatment_flags_keep_order() {
        let cli = parse(&["--treatment", "Placebo", "--treatment", "Low", "--treatment", "High"]);
        let config = randomization_config(&cli.randomization).unwrap();
        assert_eq!(config.treatments, vec!["Placebo", "Low", "High"]);
        assert_eq!(config.block_size(), 15);
    }

    #[test]
    fn arms_generate_letter_labels() {
        let cli = parse(&["--arms", "3", "--multiplier", "2"]);
        let config = randomization_config(&cli.randomization).unwrap();
        assert_eq!(config.treatments, vec!["A", "B", "C"]);
        assert_eq!(config.block_size(), 6);
    }

    #[test]
    fn block_size_sets_multiplier() {
        let cli = parse(&["--arms", "4", "--block-size", "8"]);
        let config = randomization_config(&cli.randomization).unwrap();
        assert_eq!(config.multiplier, 2);
    }

    #[test]
    fn block_size_must_divide_by_arms() {
        let cli = parse(&["--block-size", "7"]);
        let error = randomization_config(&cli.randomization).unwrap_err();
        assert_eq!(
            error,
            ModelError::BlockSizeNotDivisible {
                block_size: 7,
                arms: 2
            }
        );
    }

    #[test]
    fn zero_multiplier_is_rejected() {
        let cli = parse(&["--multiplier", "0"]);
        assert_eq!(
            randomization_config(&cli.randomization).unwrap_err(),
            ModelError::NonPositiveMultiplier
        );
    }

    #[test]
    fn too_many_arms_is_rejected() {
        let cli = parse(&["--arms", "11"]);
        assert!(matches!(
            randomization_config(&cli.randomization),
            Err(ModelError::ArmCountOutOfRange { arms: 11, .. })
        ));
    }

    #[test]
    fn huge_sizes_are_rejected_before_generation() {
        for args in [
            ["--multiplier", "18446744073709551615"],
            ["--target", "18446744073709551615"],
        ] {
            let cli = parse(&args);
            assert!(matches!(
                randomization_config(&cli.randomization),
                Err(ModelError::AllocationTooLarge { .. })
            ));
        }
    }

    #[test]
    fn conflicting_flags_fail_to_parse() {
        assert!(Cli::try_parse_from(["blockrand", "--arms", "3", "--treatment", "X"]).is_err());
        assert!(
            Cli::try_parse_from(["blockrand", "--multiplier", "2", "--block-size", "4"]).is_err()
        );
    }

    #[test]
    fn svg_only_format() {
        let cli = parse(&["--format", "svg", "--output-dir", "out", "--basename", "sched"]);
        let options = render_options(&cli.output);
        assert_eq!(options.formats, vec![OutputFormat::Svg]);
        assert_eq!(
            options.path_for(OutputFormat::Svg).to_str(),
            Some("out/sched.svg")
        );
    }
}
