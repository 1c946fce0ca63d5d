use console::Style;
use seamline_core::pipeline::BlendConfig;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    path: Style,
    disabled: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            path: Style::new().underlined(),
            disabled: Style::new().dim().yellow(),
        }
    }
}

pub fn print_blend_summary(config: &BlendConfig) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Seamline Blend"));
    println!("  {}", s.title.apply_to("\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}\u{2550}"));
    println!();

    println!(
        "  {:<14}{}",
        s.label.apply_to("Output"),
        s.path.apply_to(config.output.display())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Pre-assembly"),
        if config.one_at_a_time {
            s.disabled.apply_to("disabled (one at a time)")
        } else {
            s.value.apply_to("enabled")
        }
    );
    match config.max_levels {
        Some(levels) => println!(
            "  {:<14}{}",
            s.label.apply_to("Levels"),
            s.value.apply_to(format!("capped at {levels}"))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("Levels"),
            s.value.apply_to("auto")
        ),
    }
    if let Some(ref prefix) = config.dump_pyramids {
        println!(
            "  {:<14}{}",
            s.label.apply_to("Pyramid dump"),
            s.path.apply_to(prefix.display())
        );
    }
    println!();

    println!("  {}", s.title.apply_to("Inputs"));
    for (i, input) in config.inputs.iter().enumerate() {
        println!(
            "    {}. {} {}",
            s.label.apply_to(i + 1),
            s.path.apply_to(input.path.display()),
            s.value.apply_to(format!("at ({}, {})", input.x, input.y))
        );
    }
    println!();
}
