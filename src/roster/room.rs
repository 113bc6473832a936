use std::{fmt, str::FromStr};

use super::RosterError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Room {
    Slow,
    Medium,
    Fast,
}

impl Room {
    /// Display order, also the order of the poll buttons.
    pub const ALL: [Room; 3] = [Room::Slow, Room::Medium, Room::Fast];

    pub fn index(self) -> usize {
        use Room::*;
        match self {
            Slow => 0,
            Medium => 1,
            Fast => 2,
        }
    }

    pub fn value(self) -> &'static str {
        use Room::*;
        match self {
            Slow => "slow",
            Medium => "medium",
            Fast => "fast",
        }
    }

    pub fn emoji(self) -> &'static str {
        use Room::*;
        match self {
            Slow => ":turtle:",
            Medium => ":dog:",
            Fast => ":racehorse:",
        }
    }

    fn name(self) -> &'static str {
        use Room::*;
        match self {
            Slow => "Slow",
            Medium => "Medium",
            Fast => "Fast",
        }
    }

    pub fn description(self) -> &'static str {
        use Room::*;
        match self {
            Slow => "Everybody works off the same screen and writes code together.",
            Medium => "Everyone writes their own code with input from TAs.",
            Fast => "Everyone writes their own code and TAs rant about nothing in particular.",
        }
    }

    /// Line shown next to the room's button in the poll.
    pub fn prompt_line(self) -> String {
        format!("{} *{} room*\n{}", self.emoji(), self.name(), self.description())
    }

    /// Heading above the room's members once anyone has joined.
    pub fn assignment_title(self) -> String {
        format!("{}*{} Room*", self.emoji(), self.name())
    }
}

impl FromStr for Room {
    type Err = RosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Room::ALL
            .into_iter()
            .find(|room| room.value() == s)
            .ok_or_else(|| RosterError::InvalidRoom(s.to_owned()))
    }
}

impl fmt::Display for Room {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_button_values() {
        assert_eq!("slow".parse::<Room>().unwrap(), Room::Slow);
        assert_eq!("medium".parse::<Room>().unwrap(), Room::Medium);
        assert_eq!("fast".parse::<Room>().unwrap(), Room::Fast);
    }

    #[test]
    fn unknown_value_is_invalid_room() {
        let err = "Fast".parse::<Room>().unwrap_err();
        assert!(matches!(err, RosterError::InvalidRoom(ref v) if v == "Fast"));
        assert!("".parse::<Room>().is_err());
    }

    #[test]
    fn value_round_trips_through_display() {
        for room in Room::ALL {
            assert_eq!(room.to_string().parse::<Room>().unwrap(), room);
        }
    }

    #[test]
    fn labels() {
        assert_eq!(
            Room::Slow.prompt_line(),
            ":turtle: *Slow room*\nEverybody works off the same screen and writes code together."
        );
        assert_eq!(Room::Fast.assignment_title(), ":racehorse:*Fast Room*");
    }
}
