use crate::ast::{
    BaseDecl, BeamDecl, GravityDecl, MassDecl, ReleaseDecl, ReleaseKind, Scenario, SimulateDecl,
};
use crate::diagnostics::Span;
use thiserror::Error;

/// Parse error with optional span information
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("{message}")]
    SyntaxError {
        message: String,
        span: Option<Span>,
    },
}

impl ParseError {
    pub fn new(message: impl Into<String>, span: Option<Span>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span,
        }
    }

    pub fn message(message: impl Into<String>) -> Self {
        Self::SyntaxError {
            message: message.into(),
            span: None,
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::SyntaxError { span, .. } => *span,
        }
    }
}

/// Helper to track byte offsets while parsing
struct ParseContext {
    line_offsets: Vec<usize>, // Byte offset of start of each line
    len: usize,
}

impl ParseContext {
    fn new(source: &str) -> Self {
        let mut line_offsets = vec![0];
        let mut offset = 0;
        for ch in source.chars() {
            offset += ch.len_utf8();
            if ch == '\n' {
                line_offsets.push(offset);
            }
        }
        Self {
            line_offsets,
            len: source.len(),
        }
    }

    fn line_start(&self, line: usize) -> usize {
        self.line_offsets.get(line).copied().unwrap_or(self.len)
    }

    /// Create a span for the entire line
    fn full_line_span(&self, line: usize) -> Span {
        Span::new(self.line_start(line), self.line_start(line + 1))
    }
}

/// `key = value` pairs following a statement keyword
struct Fields<'a> {
    line: &'a str,
    span: Option<Span>,
    entries: Vec<(&'a str, &'a str)>,
}

impl<'a> Fields<'a> {
    fn parse(rest: &'a str, line: &'a str, span: Option<Span>) -> Result<Self, ParseError> {
        let tokens: Vec<&str> = rest.split_whitespace().collect();
        if tokens.len() % 3 != 0 {
            return Err(ParseError::new(
                format!("Expected 'key = value' pairs: {}", line),
                span,
            ));
        }

        let mut entries: Vec<(&str, &str)> = Vec::new();
        for chunk in tokens.chunks(3) {
            let (key, eq, value) = (chunk[0], chunk[1], chunk[2]);
            if eq != "=" {
                return Err(ParseError::new(
                    format!("Expected '=' after '{}': {}", key, line),
                    span,
                ));
            }
            if entries.iter().any(|(k, _)| *k == key) {
                return Err(ParseError::new(
                    format!("Duplicate key '{}': {}", key, line),
                    span,
                ));
            }
            entries.push((key, value));
        }

        Ok(Self {
            line,
            span,
            entries,
        })
    }

    fn take(&mut self, key: &str) -> Result<&'a str, ParseError> {
        let idx = self
            .entries
            .iter()
            .position(|(k, _)| *k == key)
            .ok_or_else(|| {
                ParseError::new(format!("Expected '{} =' in: {}", key, self.line), self.span)
            })?;
        Ok(self.entries.remove(idx).1)
    }

    fn number(&mut self, key: &str) -> Result<f64, ParseError> {
        let raw = self.take(key)?;
        raw.parse::<f64>().map_err(|_| {
            ParseError::new(format!("Invalid number for '{}': {}", key, raw), self.span)
        })
    }

    fn count(&mut self, key: &str) -> Result<u64, ParseError> {
        let raw = self.take(key)?;
        raw.parse::<u64>().map_err(|_| {
            ParseError::new(format!("Invalid count for '{}': {}", key, raw), self.span)
        })
    }

    /// Reject keys nobody asked for
    fn finish(self) -> Result<(), ParseError> {
        match self.entries.first() {
            Some((key, _)) => Err(ParseError::new(
                format!("Unknown key '{}': {}", key, self.line),
                self.span,
            )),
            None => Ok(()),
        }
    }
}

fn duplicate<T>(slot: &Option<T>, keyword: &str, span: Span) -> Result<(), ParseError> {
    if slot.is_some() {
        return Err(ParseError::new(
            format!("Duplicate '{}' declaration", keyword),
            Some(span),
        ));
    }
    Ok(())
}

/// Parse a trebuchet scenario from source text
pub fn parse_scenario(source: &str) -> Result<Scenario, ParseError> {
    let ctx = ParseContext::new(source);
    let mut beam = None;
    let mut counterweight = None;
    let mut projectile = None;
    let mut base = None;
    let mut gravity = None;
    let mut simulate = None;
    let mut release = None;

    for (i, raw) in source.lines().enumerate() {
        let line = raw.trim();
        let line_span = ctx.full_line_span(i);

        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let (keyword, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let span = Some(line_span);
        match keyword {
            "beam" => {
                duplicate(&beam, keyword, line_span)?;
                beam = Some(parse_beam(rest, line, span)?);
            }
            "counterweight" => {
                duplicate(&counterweight, keyword, line_span)?;
                counterweight = Some(parse_mass(rest, line, span)?);
            }
            "projectile" => {
                duplicate(&projectile, keyword, line_span)?;
                projectile = Some(parse_mass(rest, line, span)?);
            }
            "base" => {
                duplicate(&base, keyword, line_span)?;
                let mut fields = Fields::parse(rest, line, span)?;
                let height = fields.number("height")?;
                fields.finish()?;
                base = Some(BaseDecl { height, span });
            }
            "gravity" => {
                duplicate(&gravity, keyword, line_span)?;
                let mut fields = Fields::parse(rest, line, span)?;
                let g = fields.number("g")?;
                fields.finish()?;
                gravity = Some(GravityDecl { g, span });
            }
            "simulate" => {
                duplicate(&simulate, keyword, line_span)?;
                simulate = Some(parse_simulate(rest, line, span)?);
            }
            "release" => {
                duplicate(&release, keyword, line_span)?;
                release = Some(parse_release(rest, line, span)?);
            }
            _ => {
                return Err(ParseError::new(
                    format!("Unexpected token: {}", keyword),
                    span,
                ));
            }
        }
    }

    let missing = |keyword: &str| ParseError::message(format!("Missing '{}' declaration", keyword));

    Ok(Scenario {
        beam: beam.ok_or_else(|| missing("beam"))?,
        counterweight: counterweight.ok_or_else(|| missing("counterweight"))?,
        projectile: projectile.ok_or_else(|| missing("projectile"))?,
        base: base.ok_or_else(|| missing("base"))?,
        gravity,
        simulate: simulate.ok_or_else(|| missing("simulate"))?,
        release,
    })
}

/// Parse a beam declaration: `beam long = x short = x width = x thickness = x density = x`
fn parse_beam(rest: &str, line: &str, span: Option<Span>) -> Result<BeamDecl, ParseError> {
    let mut fields = Fields::parse(rest, line, span)?;
    let decl = BeamDecl {
        long: fields.number("long")?,
        short: fields.number("short")?,
        width: fields.number("width")?,
        thickness: fields.number("thickness")?,
        density: fields.number("density")?,
        span,
    };
    fields.finish()?;
    Ok(decl)
}

/// Parse `counterweight mass = x` or `projectile mass = x`
fn parse_mass(rest: &str, line: &str, span: Option<Span>) -> Result<MassDecl, ParseError> {
    let mut fields = Fields::parse(rest, line, span)?;
    let mass = fields.number("mass")?;
    fields.finish()?;
    Ok(MassDecl { mass, span })
}

/// Parse a simulate declaration: `simulate dt = x steps = n`
fn parse_simulate(rest: &str, line: &str, span: Option<Span>) -> Result<SimulateDecl, ParseError> {
    let mut fields = Fields::parse(rest, line, span)?;
    let dt = fields.number("dt")?;
    let steps = fields.count("steps")?;
    fields.finish()?;
    Ok(SimulateDecl { dt, steps, span })
}

/// Parse `release at angle = deg`, `release after steps = n` or `release after time = s`
fn parse_release(rest: &str, line: &str, span: Option<Span>) -> Result<ReleaseDecl, ParseError> {
    let (preposition, rest) = rest
        .trim()
        .split_once(char::is_whitespace)
        .ok_or_else(|| ParseError::new(format!("Incomplete release: {}", line), span))?;
    let mut fields = Fields::parse(rest, line, span)?;

    let kind = match preposition {
        "at" => ReleaseKind::Angle(fields.number("angle")?),
        "after" => {
            if fields.entries.iter().any(|(k, _)| *k == "steps") {
                ReleaseKind::Steps(fields.count("steps")?)
            } else {
                ReleaseKind::Time(fields.number("time")?)
            }
        }
        other => {
            return Err(ParseError::new(
                format!("Expected 'at' or 'after' in release, got '{}'", other),
                span,
            ));
        }
    };
    fields.finish()?;

    Ok(ReleaseDecl { kind, span })
}
