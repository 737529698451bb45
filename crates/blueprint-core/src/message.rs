//! Localized success/error reporting
//!
//! All user-facing outcome lines flow through the [`Messenger`], which
//! localizes the message key, applies the icon/depth prefix and prints the
//! styled line. The sink is swappable in tests so output can be captured
//! without touching global state.

use crate::locale::Localizer;
use colored::Colorize;

/// Presentation options for one message line.
#[derive(Debug, Clone, Copy)]
pub struct MessageOptions {
    /// Nesting depth; depth > 0 suppresses the icon and prefixes dashes.
    pub depth: usize,
    /// Leading status glyph at depth 0.
    pub icon: bool,
}

impl Default for MessageOptions {
    fn default() -> Self {
        Self {
            depth: 0,
            icon: true,
        }
    }
}

impl MessageOptions {
    /// Options for a line at the given nesting depth.
    pub fn depth(depth: usize) -> Self {
        Self { depth, icon: true }
    }
}

#[cfg(test)]
pub(crate) type CaptureBuffer = std::rc::Rc<std::cell::RefCell<Vec<String>>>;

enum Tone {
    Success,
    Error,
    Note,
}

enum Sink {
    Stdout,
    #[cfg(test)]
    Capture(CaptureBuffer),
}

/// Formats and prints localized outcome lines.
pub struct Messenger<'a> {
    localizer: &'a Localizer,
    sink: Sink,
}

impl<'a> Messenger<'a> {
    pub fn new(localizer: &'a Localizer) -> Self {
        Self {
            localizer,
            sink: Sink::Stdout,
        }
    }

    /// A messenger that collects plain (unstyled) lines into a buffer.
    #[cfg(test)]
    pub(crate) fn capturing(localizer: &'a Localizer) -> (Self, CaptureBuffer) {
        let buffer = CaptureBuffer::default();
        (
            Self {
                localizer,
                sink: Sink::Capture(CaptureBuffer::clone(&buffer)),
            },
            buffer,
        )
    }

    /// Localized lookup passthrough for controllers.
    pub fn translate(&self, key: &str, args: &[&str]) -> String {
        self.localizer.translate(key, args)
    }

    /// Print a bold green outcome line.
    pub fn success(&self, key: &str, options: MessageOptions, args: &[&str]) {
        let line = self.compose("✔︎ ", key, options, args);
        self.emit(Tone::Success, line);
    }

    /// Print a bold red outcome line.
    pub fn error(&self, key: &str, options: MessageOptions, args: &[&str]) {
        let line = self.compose("✖ ", key, options, args);
        self.emit(Tone::Error, line);
    }

    /// Print an unstyled informational line.
    pub fn note(&self, key: &str, args: &[&str]) {
        let line = self.localizer.translate(key, args);
        self.emit(Tone::Note, line);
    }

    fn compose(&self, icon: &str, key: &str, options: MessageOptions, args: &[&str]) -> String {
        let mut line = String::new();
        if options.depth > 0 {
            line.push_str("  ");
            line.push_str(&"-".repeat(options.depth));
            line.push(' ');
        } else if options.icon {
            line.push_str(icon);
        } else {
            line.push_str("  ");
        }
        line.push_str(&self.localizer.translate(key, args));
        line
    }

    fn emit(&self, tone: Tone, line: String) {
        match &self.sink {
            Sink::Stdout => match tone {
                Tone::Success => println!("{}", line.green().bold()),
                Tone::Error => println!("{}", line.red().bold()),
                Tone::Note => println!("{line}"),
            },
            #[cfg(test)]
            Sink::Capture(buffer) => buffer.borrow_mut().push(line),
        }
    }
}
