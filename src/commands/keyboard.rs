use super::listener::{Command, CommandDiscriminants};
use crate::config::KeyBindingsConfig;
use crossterm::event::{Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEventKind, poll, read};
use serde_with::DeserializeFromStr;
use std::{fmt, io, str::FromStr, time::Duration};

const NUMBER_PREFIX: &str = "<number>";

// Keys that can be named in a binding as `<name>`. Names match ignoring case and underscores.
const NAMED_KEYS: &[(&str, KeyCode)] = &[
    ("left", KeyCode::Left),
    ("right", KeyCode::Right),
    ("up", KeyCode::Up),
    ("down", KeyCode::Down),
    ("page_up", KeyCode::PageUp),
    ("page_down", KeyCode::PageDown),
    ("home", KeyCode::Home),
    ("end", KeyCode::End),
    ("tab", KeyCode::Tab),
    ("backtab", KeyCode::BackTab),
    ("enter", KeyCode::Enter),
    ("esc", KeyCode::Esc),
    ("backspace", KeyCode::Backspace),
];

/// Turns terminal events into deck commands.
///
/// Keys are buffered while they could still complete a binding, e.g. the first `g` of `gg` or the
/// digits of `12G`. Mouse presses and resizes map to commands directly.
pub struct KeyboardListener {
    bindings: CommandKeyBindings,
    pending: Vec<KeyStroke>,
}

impl KeyboardListener {
    pub fn new(bindings: CommandKeyBindings) -> Self {
        Self { bindings, pending: Vec::new() }
    }

    /// Wait up to `timeout` for an event and translate it.
    pub(crate) fn poll_next_command(&mut self, timeout: Duration) -> io::Result<Option<Command>> {
        if !poll(timeout)? {
            return Ok(None);
        }
        let event = read()?;
        Ok(self.process_event(event))
    }

    fn process_event(&mut self, event: Event) -> Option<Command> {
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Release => None,
            Event::Key(key) => self.process_key(KeyStroke::from(key)),
            Event::Mouse(mouse) => match mouse.kind {
                MouseEventKind::Down(MouseButton::Left) => Some(Command::Click { column: mouse.column, row: mouse.row }),
                _ => None,
            },
            Event::Resize(..) => Some(Command::Redraw),
            _ => {
                self.pending.clear();
                None
            }
        }
    }

    fn process_key(&mut self, stroke: KeyStroke) -> Option<Command> {
        self.pending.push(stroke);
        match self.bindings.lookup(&self.pending) {
            Lookup::Found(command) => {
                self.pending.clear();
                Some(command)
            }
            Lookup::Incomplete => None,
            Lookup::Unbound => {
                self.pending.clear();
                None
            }
        }
    }
}

enum Lookup {
    Found(Command),
    Incomplete,
    Unbound,
}

/// The validated set of bindings for every command.
pub struct CommandKeyBindings {
    bindings: Vec<(KeyBinding, CommandDiscriminants)>,
}

impl CommandKeyBindings {
    fn lookup(&self, strokes: &[KeyStroke]) -> Lookup {
        let mut incomplete = false;
        for (binding, command) in &self.bindings {
            match binding.match_strokes(strokes) {
                BindingMatch::Complete(number) => {
                    if let Some(command) = Self::make_command(command, number) {
                        return Lookup::Found(command);
                    }
                }
                BindingMatch::Prefix => incomplete = true,
                BindingMatch::Mismatch => (),
            }
        }
        if incomplete { Lookup::Incomplete } else { Lookup::Unbound }
    }

    fn make_command(command: &CommandDiscriminants, number: Option<u32>) -> Option<Command> {
        use CommandDiscriminants as D;
        let command = match command {
            D::Next => Command::Next,
            D::Previous => Command::Previous,
            D::FirstSlide => Command::FirstSlide,
            D::LastSlide => Command::LastSlide,
            D::GoToSlide => Command::GoToSlide(number?),
            D::FocusNext => Command::FocusNext,
            D::FocusPrevious => Command::FocusPrevious,
            D::Activate => Command::Activate,
            D::Exit => Command::Exit,
            // Not bindable to keys.
            D::Redraw | D::Click => return None,
        };
        Some(command)
    }
}

impl TryFrom<KeyBindingsConfig> for CommandKeyBindings {
    type Error = KeyBindingsValidationError;

    fn try_from(config: KeyBindingsConfig) -> Result<Self, Self::Error> {
        let groups = [
            ("next", CommandDiscriminants::Next, config.next),
            ("previous", CommandDiscriminants::Previous, config.previous),
            ("first_slide", CommandDiscriminants::FirstSlide, config.first_slide),
            ("last_slide", CommandDiscriminants::LastSlide, config.last_slide),
            ("go_to_slide", CommandDiscriminants::GoToSlide, config.go_to_slide),
            ("focus_next", CommandDiscriminants::FocusNext, config.focus_next),
            ("focus_previous", CommandDiscriminants::FocusPrevious, config.focus_previous),
            ("activate", CommandDiscriminants::Activate, config.activate),
            ("exit", CommandDiscriminants::Exit, config.exit),
        ];
        let mut bindings: Vec<(KeyBinding, CommandDiscriminants)> = Vec::new();
        for (name, command, group) in groups {
            let wants_number = command == CommandDiscriminants::GoToSlide;
            for binding in group {
                if binding.numbered != wants_number {
                    return Err(KeyBindingsValidationError::Number { command: name, binding });
                }
                if let Some((existing, _)) = bindings.iter().find(|(existing, _)| existing.overlaps(&binding)) {
                    return Err(KeyBindingsValidationError::Conflict(existing.clone(), binding));
                }
                bindings.push((binding, command));
            }
        }
        Ok(Self { bindings })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum KeyBindingsValidationError {
    #[error("invalid binding {binding} for {command}: only go_to_slide bindings start with <number>, and they must")]
    Number { command: &'static str, binding: KeyBinding },

    #[error("conflicting keybindings: {0} and {1}")]
    Conflict(KeyBinding, KeyBinding),
}

/// A single key press, ignoring every modifier except control.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct KeyStroke {
    code: KeyCode,
    control: bool,
}

impl KeyStroke {
    fn digit(&self) -> Option<u32> {
        match self.code {
            KeyCode::Char(c) if !self.control => c.to_digit(10),
            _ => None,
        }
    }
}

impl From<KeyEvent> for KeyStroke {
    fn from(event: KeyEvent) -> Self {
        // Shift is already part of the character for printable keys.
        Self { code: event.code, control: event.modifiers.contains(KeyModifiers::CONTROL) }
    }
}

impl fmt::Display for KeyStroke {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            KeyCode::Char(c) if self.control => write!(f, "<c-{c}>"),
            KeyCode::Char(c) => write!(f, "{c}"),
            code => match NAMED_KEYS.iter().find(|(_, named)| *named == code) {
                Some((name, _)) => write!(f, "<{name}>"),
                None => write!(f, "<{code:?}>"),
            },
        }
    }
}

/// A key binding, e.g. `l`, `<right>`, `<c-c>`, `gg` or `<number>G`.
#[derive(Clone, Debug, PartialEq, Eq, DeserializeFromStr)]
pub struct KeyBinding {
    numbered: bool,
    strokes: Vec<KeyStroke>,
}

impl KeyBinding {
    fn match_strokes(&self, mut strokes: &[KeyStroke]) -> BindingMatch {
        let mut number = None;
        if self.numbered {
            let digits = strokes.iter().take_while(|stroke| stroke.digit().is_some()).count();
            if digits == 0 {
                return BindingMatch::Mismatch;
            }
            // Huge numbers saturate and get rejected as out of range later on.
            let value = strokes[..digits]
                .iter()
                .filter_map(KeyStroke::digit)
                .fold(0u32, |value, digit| value.saturating_mul(10).saturating_add(digit));
            number = Some(value);
            strokes = &strokes[digits..];
        }
        if strokes.len() > self.strokes.len() || !self.strokes.starts_with(strokes) {
            BindingMatch::Mismatch
        } else if strokes.len() == self.strokes.len() {
            BindingMatch::Complete(number)
        } else {
            BindingMatch::Prefix
        }
    }

    // Two bindings overlap if some key sequence could trigger either of them.
    fn overlaps(&self, other: &KeyBinding) -> bool {
        match (self.numbered, other.numbered) {
            (true, false) => other.strokes.first().is_some_and(|stroke| stroke.digit().is_some()),
            (false, true) => other.overlaps(self),
            _ => self.strokes.starts_with(&other.strokes) || other.strokes.starts_with(&self.strokes),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum BindingMatch {
    Complete(Option<u32>),
    Prefix,
    Mismatch,
}

impl FromStr for KeyBinding {
    type Err = KeyBindingParseError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let (numbered, mut rest) = match input.strip_prefix(NUMBER_PREFIX) {
            Some(rest) => (true, rest),
            None => (false, input),
        };
        let mut strokes = Vec::new();
        while !rest.is_empty() {
            let (stroke, tail) = parse_stroke(rest)?;
            strokes.push(stroke);
            rest = tail;
        }
        if strokes.is_empty() {
            return Err(KeyBindingParseError::NoKeys);
        }
        Ok(Self { numbered, strokes })
    }
}

fn parse_stroke(input: &str) -> Result<(KeyStroke, &str), KeyBindingParseError> {
    if let Some(inner) = input.strip_prefix('<') {
        let (name, rest) = inner.split_once('>').ok_or(KeyBindingParseError::Unterminated)?;
        return Ok((parse_named_key(name)?, rest));
    }
    let mut chars = input.chars();
    let c = chars.next().ok_or(KeyBindingParseError::NoKeys)?;
    if !c.is_ascii_graphic() && c != ' ' {
        return Err(KeyBindingParseError::InvalidKey(c));
    }
    Ok((KeyStroke { code: KeyCode::Char(c), control: false }, chars.as_str()))
}

fn parse_named_key(name: &str) -> Result<KeyStroke, KeyBindingParseError> {
    if let Some(key) = name.strip_prefix("c-") {
        let mut chars = key.chars();
        return match (chars.next(), chars.next()) {
            (Some(c), None) if c.is_ascii_alphabetic() => {
                Ok(KeyStroke { code: KeyCode::Char(c.to_ascii_lowercase()), control: true })
            }
            _ => Err(KeyBindingParseError::InvalidControlKey(name.to_string())),
        };
    }
    let normalized: String = name.chars().filter(|c| *c != '_').map(|c| c.to_ascii_lowercase()).collect();
    if normalized == "number" {
        return Err(KeyBindingParseError::MisplacedNumber);
    }
    NAMED_KEYS
        .iter()
        .find(|(known, _)| known.replace('_', "") == normalized)
        .map(|(_, code)| KeyStroke { code: *code, control: false })
        .ok_or_else(|| KeyBindingParseError::UnknownKey(name.to_string()))
}

impl fmt::Display for KeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.numbered {
            write!(f, "{NUMBER_PREFIX}")?;
        }
        for stroke in &self.strokes {
            write!(f, "{stroke}")?;
        }
        Ok(())
    }
}

#[cfg(feature = "json-schema")]
impl schemars::JsonSchema for KeyBinding {
    fn schema_name() -> String {
        "KeyBinding".into()
    }

    fn json_schema(generator: &mut schemars::gen::SchemaGenerator) -> schemars::schema::Schema {
        <String as schemars::JsonSchema>::json_schema(generator)
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyBindingParseError {
    #[error("binding has no keys")]
    NoKeys,

    #[error("missing '>' after '<'")]
    Unterminated,

    #[error("unknown key <{0}>")]
    UnknownKey(String),

    #[error("not a valid key: {0:?}")]
    InvalidKey(char),

    #[error("invalid control key <{0}>")]
    InvalidControlKey(String),

    #[error("<number> can only start a binding")]
    MisplacedNumber,
}

#[cfg(test)]
mod test {
    use super::*;
    use crossterm::event::MouseEvent;
    use rstest::rstest;

    fn key(code: KeyCode) -> Event {
        Event::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    fn chars(input: &str) -> Vec<Event> {
        input.chars().map(|c| key(KeyCode::Char(c))).collect()
    }

    fn control(c: char) -> Event {
        Event::Key(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL))
    }

    fn listener() -> KeyboardListener {
        let bindings = CommandKeyBindings::try_from(KeyBindingsConfig::default()).expect("invalid bindings");
        KeyboardListener::new(bindings)
    }

    fn feed(listener: &mut KeyboardListener, events: Vec<Event>) -> Vec<Command> {
        events.into_iter().filter_map(|event| listener.process_event(event)).collect()
    }

    fn bindings(next: &[&str], go_to_slide: &[&str]) -> Result<CommandKeyBindings, KeyBindingsValidationError> {
        let parse = |raw: &[&str]| raw.iter().map(|b| b.parse().unwrap()).collect();
        let config = KeyBindingsConfig {
            next: parse(next),
            go_to_slide: parse(go_to_slide),
            previous: vec![],
            first_slide: vec![],
            last_slide: vec![],
            focus_next: vec![],
            focus_previous: vec![],
            activate: vec![],
            exit: vec![],
        };
        CommandKeyBindings::try_from(config)
    }

    #[rstest]
    #[case::char("l")]
    #[case::space(" ")]
    #[case::sequence("gg")]
    #[case::named("<page_down>")]
    #[case::control("<c-c>")]
    #[case::numbered("<number>G")]
    #[case::mixed("<home>x<end>")]
    fn parse_and_display(#[case] input: &str) {
        let binding = KeyBinding::from_str(input).expect("invalid binding");
        assert_eq!(binding.to_string(), input);
    }

    #[rstest]
    #[case::camel_case("<PageDown>", "<page_down>")]
    #[case::backtab("<BackTab>", "<backtab>")]
    #[case::upper_control("<c-C>", "<c-c>")]
    fn normalized_names(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(KeyBinding::from_str(input).unwrap().to_string(), expected);
    }

    #[rstest]
    #[case::empty("", KeyBindingParseError::NoKeys)]
    #[case::only_number("<number>", KeyBindingParseError::NoKeys)]
    #[case::unterminated("<left", KeyBindingParseError::Unterminated)]
    #[case::unknown("<potato>", KeyBindingParseError::UnknownKey("potato".into()))]
    #[case::non_ascii("🚀", KeyBindingParseError::InvalidKey('🚀'))]
    #[case::long_control("<c-ab>", KeyBindingParseError::InvalidControlKey("c-ab".into()))]
    #[case::number_later("G<number>", KeyBindingParseError::MisplacedNumber)]
    fn invalid_bindings(#[case] input: &str, #[case] expected: KeyBindingParseError) {
        assert_eq!(KeyBinding::from_str(input).unwrap_err(), expected);
    }

    #[rstest]
    #[case::right(vec![key(KeyCode::Right)], Command::Next)]
    #[case::vim_next(chars("l"), Command::Next)]
    #[case::page_up(vec![key(KeyCode::PageUp)], Command::Previous)]
    #[case::first(chars("gg"), Command::FirstSlide)]
    #[case::home(vec![key(KeyCode::Home)], Command::FirstSlide)]
    #[case::last(chars("G"), Command::LastSlide)]
    #[case::go_to(chars("12G"), Command::GoToSlide(12))]
    #[case::tab(vec![key(KeyCode::Tab)], Command::FocusNext)]
    #[case::backtab(vec![key(KeyCode::BackTab)], Command::FocusPrevious)]
    #[case::enter(vec![key(KeyCode::Enter)], Command::Activate)]
    #[case::space(chars(" "), Command::Activate)]
    #[case::quit(chars("q"), Command::Exit)]
    #[case::interrupt(vec![control('c')], Command::Exit)]
    fn default_commands(#[case] events: Vec<Event>, #[case] expected: Command) {
        let mut listener = listener();
        assert_eq!(feed(&mut listener, events), &[expected]);
    }

    #[test]
    fn shifted_keys_match() {
        let mut listener = listener();
        let event = Event::Key(KeyEvent::new(KeyCode::Char('G'), KeyModifiers::SHIFT));
        assert_eq!(listener.process_event(event), Some(Command::LastSlide));
    }

    #[test]
    fn unbound_key_discards_pending() {
        let mut listener = listener();
        assert!(feed(&mut listener, chars("gx")).is_empty());
        assert!(feed(&mut listener, chars("g")).is_empty());
        assert_eq!(feed(&mut listener, chars("g")), &[Command::FirstSlide]);
    }

    #[test]
    fn digits_wait_for_suffix() {
        let mut listener = listener();
        assert!(feed(&mut listener, chars("3")).is_empty());
        assert!(feed(&mut listener, chars("4")).is_empty());
        assert_eq!(feed(&mut listener, chars("G")), &[Command::GoToSlide(34)]);
    }

    #[test]
    fn huge_number_saturates() {
        let mut listener = listener();
        assert_eq!(feed(&mut listener, chars("99999999999G")), &[Command::GoToSlide(u32::MAX)]);
        assert_eq!(feed(&mut listener, chars("2G")), &[Command::GoToSlide(2)]);
    }

    #[test]
    fn release_events_ignored() {
        let mut listener = listener();
        let mut event = KeyEvent::new(KeyCode::Right, KeyModifiers::NONE);
        event.kind = KeyEventKind::Release;
        assert_eq!(listener.process_event(Event::Key(event)), None);
    }

    #[rstest]
    #[case::left_click(MouseEventKind::Down(MouseButton::Left), Some(Command::Click { column: 4, row: 7 }))]
    #[case::right_click(MouseEventKind::Down(MouseButton::Right), None)]
    #[case::release(MouseEventKind::Up(MouseButton::Left), None)]
    #[case::moved(MouseEventKind::Moved, None)]
    fn mouse(#[case] kind: MouseEventKind, #[case] expected: Option<Command>) {
        let mut listener = listener();
        let event = MouseEvent { kind, column: 4, row: 7, modifiers: KeyModifiers::empty() };
        assert_eq!(listener.process_event(Event::Mouse(event)), expected);
    }

    #[test]
    fn resize_redraws() {
        let mut listener = listener();
        assert_eq!(listener.process_event(Event::Resize(80, 24)), Some(Command::Redraw));
    }

    #[rstest]
    #[case::same(&["a", "a"], &[])]
    #[case::prefix(&["g", "gg"], &[])]
    #[case::digit_and_number(&["1"], &["<number>G"])]
    #[case::two_numbered(&[], &["<number>G", "<number>GG"])]
    fn conflicts(#[case] next: &[&str], #[case] go_to_slide: &[&str]) {
        let result = bindings(next, go_to_slide);
        assert!(matches!(result, Err(KeyBindingsValidationError::Conflict(..))));
    }

    #[rstest]
    #[case::different(&["a", "b"], &[])]
    #[case::shared_prefix(&["ga", "gb"], &[])]
    #[case::suffix_alone(&["G"], &["<number>G"])]
    fn no_conflicts(#[case] next: &[&str], #[case] go_to_slide: &[&str]) {
        bindings(next, go_to_slide).expect("unexpected conflict");
    }

    #[rstest]
    #[case::go_to_without_number(&[], &["g"])]
    #[case::next_with_number(&["<number>n"], &[])]
    fn number_placement(#[case] next: &[&str], #[case] go_to_slide: &[&str]) {
        let result = bindings(next, go_to_slide);
        assert!(matches!(result, Err(KeyBindingsValidationError::Number { .. })));
    }
}
