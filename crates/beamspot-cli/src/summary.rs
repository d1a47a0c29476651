use std::path::Path;

use beamspot_core::dataset::Selection;
use beamspot_core::profile::{Profile, ProfileStats};
use beamspot_core::spots::SpotRegistry;
use console::Style;

struct Styles {
    title: Style,
    label: Style,
    value: Style,
    disabled: Style,
    path: Style,
}

impl Styles {
    fn new() -> Self {
        Self {
            title: Style::new().cyan().bold(),
            label: Style::new().dim(),
            value: Style::new().bold().white(),
            disabled: Style::new().dim().yellow(),
            path: Style::new().underlined(),
        }
    }
}

fn rule(s: &Styles, width: usize) -> String {
    s.title.apply_to("\u{2550}".repeat(width)).to_string()
}

pub fn print_profile_summary(file: &Path, profile: &Profile, stats: &ProfileStats) {
    let s = Styles::new();
    let [p1, p2] = profile.handles;

    println!();
    println!("  {}", s.title.apply_to("Line Profile"));
    println!("  {}", rule(&s, 12));
    println!();
    println!("  {:<14}{}", s.label.apply_to("Input"), s.path.apply_to(file.display()));
    println!(
        "  {:<14}{}",
        s.label.apply_to("Line"),
        s.value
            .apply_to(format!("({}, {}) -> ({}, {})", p1.x, p1.y, p2.x, p2.y))
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Samples"),
        s.value.apply_to(profile.len())
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Min / mean"),
        s.value.apply_to(format!("{:.2} / {:.2}", stats.min, stats.mean))
    );
    match stats.fwhm_length {
        Some(w) => println!(
            "  {:<14}{}",
            s.label.apply_to("FWHM"),
            s.value.apply_to(format!("{w:.2} px"))
        ),
        None => println!(
            "  {:<14}{}",
            s.label.apply_to("FWHM"),
            s.disabled.apply_to("undefined")
        ),
    }
    println!();
}

pub fn print_spot_table(selection: &Selection, registry: &SpotRegistry) {
    let s = Styles::new();

    println!();
    println!("  {}", s.title.apply_to("Spot Positions"));
    println!("  {}", rule(&s, 14));
    println!();
    println!(
        "  {:<14}{}",
        s.label.apply_to("Date"),
        s.value.apply_to(selection.date)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Energy"),
        s.value.apply_to(selection.energy)
    );
    println!(
        "  {:<14}{}",
        s.label.apply_to("Image"),
        s.path.apply_to(selection.image_file_location.display())
    );
    println!();

    if registry.is_empty() {
        println!("  {}", s.disabled.apply_to("No spot rows with a known label"));
        println!();
        return;
    }

    println!(
        "  {}",
        s.label.apply_to(format!(
            "{:<6}{:>18}{:>18}{:>16}",
            "spot", "expected", "measured", "offset"
        ))
    );
    for r in registry.iter() {
        let (dx, dy) = r.offset();
        println!(
            "  {:<6}{:>18}{:>18}{:>16}",
            r.label,
            format!("({:.1}, {:.1})", r.expected.x, r.expected.y),
            format!("({:.1}, {:.1})", r.measured.x, r.measured.y),
            s.value.apply_to(format!("({dx:+.1}, {dy:+.1})")),
        );
    }
    println!();
}
