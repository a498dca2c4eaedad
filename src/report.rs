use popgram::{CategorySummary, GenerationDetails, GrammarConfig};

/// What a span of report text says, which decides its SGR style.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Tone {
    Title,
    Section,
    Category,
    Kept,
    Shadowed,
    Muted,
}

impl Tone {
    fn sgr(self) -> &'static str {
        match self {
            Tone::Title => "1;36",
            Tone::Section => "90",
            Tone::Category => "34",
            Tone::Kept => "32",
            Tone::Shadowed => "33",
            Tone::Muted => "2",
        }
    }
}

struct Palette {
    enabled: bool,
}

impl Palette {
    fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    fn paint(&self, text: impl AsRef<str>, tone: Tone) -> String {
        let text = text.as_ref();
        if self.enabled { format!("\x1b[{}m{text}\x1b[0m", tone.sgr()) } else { text.to_string() }
    }
}

/// Print the per-category summary to stderr (stdout may carry the grammar).
pub fn print_run(config: &GrammarConfig, details: &GenerationDetails, color: bool) {
    let palette = Palette::new(color);
    eprintln!("\n{}", palette.paint(format!("⚙  Grammar: {} ({})", config.name, config.scope_name), Tone::Title));
    eprintln!("  {} {}", palette.paint("data:", Tone::Muted), config.data_dir.display());

    eprintln!("\n{}", palette.paint("━━━ Categories (precedence order) ━━━", Tone::Section));
    for (rank, category) in details.categories.iter().enumerate() {
        eprintln!("  {}", fmt_category(rank, category, &palette));
    }

    eprintln!("\n{}", palette.paint("━━━ Output ━━━", Tone::Section));
    eprintln!(
        "  Rules: {}  │  Elapsed: {}",
        palette.paint(details.rules.to_string(), Tone::Kept),
        palette.paint(format!("{:?}", details.elapsed), Tone::Muted),
    );
    eprintln!();
}

fn fmt_category(rank: usize, category: &CategorySummary, palette: &Palette) -> String {
    let status = if category.emitted {
        palette.paint(format!("✓ {} terms", category.kept), Tone::Kept)
    } else {
        palette.paint("✗ omitted (empty)", Tone::Muted)
    };

    let shadowed_tone = if category.shadowed > 0 { Tone::Shadowed } else { Tone::Muted };
    format!(
        "{} {} {}  {} {}",
        palette.paint(format!("[{rank}]"), Tone::Section),
        palette.paint(&category.name, Tone::Category),
        status,
        palette.paint("│", Tone::Muted),
        palette.paint(format!("{} shadowed", category.shadowed), shadowed_tone),
    )
}
