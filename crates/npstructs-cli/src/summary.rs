use std::path::Path;

use console::Style;
use npstructs_core::{BatchReport, FailurePolicy, LocateConfig};

struct Styles {
    title: Style,
    header: Style,
    label: Style,
    value: Style,
    method: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            header: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            method: Style::new().green(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

pub fn print_locate_summary(input: &Path, output: &Path, config: &LocateConfig) {
    let s = Styles::new();
    let pre = &config.params.preprocess;
    let seg = &config.params.segment;

    println!();
    println!("  {}", s.title.apply_to("Structure Locator"));
    println!("  {}", s.title.apply_to("\u{2550}".repeat(17)));
    println!();

    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(input.display()));
    println!("  {:<14}{}", s.label.apply_to("Output"), s.path.apply_to(output.display()));
    println!();

    println!("  {}", s.header.apply_to("Preprocessing"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Ball"),
        s.value.apply_to(format!("{} px", pre.ball_size))
    );
    if pre.smoothing_passes == 0 {
        println!("    {:<12}{}", s.label.apply_to("Smoothing"), s.disabled.apply_to("disabled"));
    } else {
        println!(
            "    {:<12}{}",
            s.label.apply_to("Smoothing"),
            s.value.apply_to(format!("sigma {} x{}", pre.sigma, pre.smoothing_passes))
        );
    }
    println!("    {:<12}{}", s.label.apply_to("Scale"), s.value.apply_to(pre.scale_factor));
    println!("    {:<12}{}", s.label.apply_to("Threshold"), s.value.apply_to(pre.threshold));
    println!();

    println!("  {}", s.header.apply_to("Segmentation"));
    println!(
        "    {:<12}{}",
        s.label.apply_to("Dilation"),
        s.value.apply_to(format!("{} px", seg.dilation_size))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Erosion"),
        s.value.apply_to(format!("{} px", seg.erosion_size))
    );
    println!(
        "    {:<12}{}",
        s.label.apply_to("Min size"),
        s.value.apply_to(format!("{} px", seg.min_structure_size))
    );
    println!();

    println!("  {}", s.header.apply_to("Batch"));
    let workers = match config.batch.workers {
        Some(n) => n.to_string(),
        None => format!("auto ({})", config.batch.worker_count()),
    };
    println!("    {:<12}{}", s.label.apply_to("Workers"), s.value.apply_to(workers));
    let policy = config.batch.on_failure;
    let styled = match policy {
        FailurePolicy::Abort => s.method.apply_to(policy.to_string()),
        FailurePolicy::SkipAndReport => s.disabled.apply_to(policy.to_string()),
    };
    println!("    {:<12}{}", s.label.apply_to("On failure"), styled);
    println!();
}

pub fn print_report_summary(report: &BatchReport, start_frame: usize, output: &Path) {
    let s = Styles::new();

    if start_frame > 0 {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Start frame"),
            s.value.apply_to(start_frame)
        );
    }
    println!(
        "  {:<14}{}",
        s.label.apply_to("Frames"),
        s.value.apply_to(report.frames_succeeded)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Structures"),
        s.value.apply_to(report.table.len())
    );

    if !report.failures.is_empty() {
        println!("  {}", s.header.apply_to("Failed frames"));
        for failure in &report.failures {
            println!(
                "    {:<12}{}",
                s.label.apply_to(failure.frame + start_frame),
                s.disabled.apply_to(&failure.message)
            );
        }
    }

    println!();
    println!("Saved to {}", s.path.apply_to(output.display()));
}
