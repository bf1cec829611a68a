//! Text protocol spoken over the wireless side channel.
//!
//! Messages are a command name and a body joined by `#`, e.g.
//! `dir#w` or `sensor#1200, 512, 498`. Anything that does not parse
//! degrades to a broadcast so a noisy link never produces an error.

/// Separator between the command name and its body.
pub const SEPARATOR: char = '#';

/// Command vocabulary of the wireless text protocol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WirelessCommand {
    /// Directional movement token (`w`, `a`, `s`, ...).
    Dir,
    /// Single character forwarded to the device as a command.
    Char,
    /// Whole word forwarded to the device as a command.
    Word,
    /// Link self-test exchange.
    Test,
    /// Sensor sample report, CSV body.
    Sensor,
    /// Free-form chat text.
    Chat,
    /// Catch-all for unrecognized traffic.
    Broadcast,
}

impl WirelessCommand {
    /// Wire name of the command.
    pub fn name(self) -> &'static str {
        match self {
            WirelessCommand::Dir => "dir",
            WirelessCommand::Char => "char",
            WirelessCommand::Word => "word",
            WirelessCommand::Test => "test",
            WirelessCommand::Sensor => "sensor",
            WirelessCommand::Chat => "chat",
            WirelessCommand::Broadcast => "misc",
        }
    }

    /// Looks up a command by its wire name.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dir" => Some(WirelessCommand::Dir),
            "char" => Some(WirelessCommand::Char),
            "word" => Some(WirelessCommand::Word),
            "test" => Some(WirelessCommand::Test),
            "sensor" => Some(WirelessCommand::Sensor),
            "chat" => Some(WirelessCommand::Chat),
            "misc" => Some(WirelessCommand::Broadcast),
            _ => None,
        }
    }
}

/// A parsed wireless message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WirelessMessage {
    pub command: WirelessCommand,
    pub body: String,
}

impl WirelessMessage {
    pub fn new(command: WirelessCommand, body: impl Into<String>) -> Self {
        WirelessMessage {
            command,
            body: body.into(),
        }
    }

    /// Renders the message in wire form, `name#body`.
    pub fn encode(&self) -> String {
        format!("{}{}{}", self.command.name(), SEPARATOR, self.body)
    }

    /// Parses a line of wireless text.
    ///
    /// Splits on the first `#`. A missing separator, an unknown command
    /// name, or an empty body all degrade to an empty
    /// [`WirelessCommand::Broadcast`], a no-op on a best-effort channel.
    pub fn decode(line: &str) -> Self {
        let broadcast = || {
            tracing::debug!(line, "unparseable wireless line, treating as broadcast");
            WirelessMessage::new(WirelessCommand::Broadcast, "")
        };
        let Some((name, body)) = line.split_once(SEPARATOR) else {
            return broadcast();
        };
        if body.is_empty() {
            return broadcast();
        }
        match WirelessCommand::from_name(name) {
            Some(command) => WirelessMessage::new(command, body),
            None => broadcast(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_joins_name_and_body() {
        let msg = WirelessMessage::new(WirelessCommand::Dir, "w");
        assert_eq!(msg.encode(), "dir#w");
    }

    #[test]
    fn decode_round_trips_every_command() {
        for command in [
            WirelessCommand::Dir,
            WirelessCommand::Char,
            WirelessCommand::Word,
            WirelessCommand::Test,
            WirelessCommand::Sensor,
            WirelessCommand::Chat,
            WirelessCommand::Broadcast,
        ] {
            let msg = WirelessMessage::new(command, "body");
            assert_eq!(WirelessMessage::decode(&msg.encode()), msg);
        }
    }

    #[test]
    fn decode_splits_on_first_separator_only() {
        let msg = WirelessMessage::decode("chat#hello#world");
        assert_eq!(msg.command, WirelessCommand::Chat);
        assert_eq!(msg.body, "hello#world");
    }

    #[test]
    fn garbage_degrades_to_empty_broadcast() {
        let msg = WirelessMessage::decode("no separator here");
        assert_eq!(msg, WirelessMessage::new(WirelessCommand::Broadcast, ""));
    }

    #[test]
    fn unknown_command_degrades_to_empty_broadcast() {
        let msg = WirelessMessage::decode("bogus#payload");
        assert_eq!(msg, WirelessMessage::new(WirelessCommand::Broadcast, ""));
    }

    #[test]
    fn empty_body_degrades_to_empty_broadcast() {
        let msg = WirelessMessage::decode("dir#");
        assert_eq!(msg, WirelessMessage::new(WirelessCommand::Broadcast, ""));
    }
}
