//! Room polls: who picked which of the three rooms.

mod error;
mod room;
mod store;

pub use error::RosterError;
pub use room::Room;
pub use store::RosterStore;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{blocks::Block, slack};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> User {
        User { id: id.into(), name: name.into() }
    }

    pub fn mention(&self) -> String {
        slack::mention(&self.id)
    }
}

/// One room poll. A user id is in at most one room at a time.
#[derive(Debug, Clone)]
pub struct RoomRoster {
    id: Uuid,
    created_by: User,
    members: [Vec<User>; 3],
}

impl RoomRoster {
    pub fn new(created_by: User) -> RoomRoster {
        RoomRoster {
            id: Uuid::now_v7(),
            created_by,
            members: Default::default(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn created_by(&self) -> &User {
        &self.created_by
    }

    /// Members of `room` in the order they joined.
    pub fn members(&self, room: Room) -> &[User] {
        &self.members[room.index()]
    }

    pub fn room_of(&self, user_id: &str) -> Option<Room> {
        Room::ALL
            .into_iter()
            .find(|room| self.members(*room).iter().any(|u| u.id == user_id))
    }

    pub fn is_empty(&self) -> bool {
        self.members.iter().all(Vec::is_empty)
    }

    /// Moves `user` into `room`, out of whichever room they were in.
    pub fn assign(&mut self, user: User, room: Room) {
        for members in &mut self.members {
            members.retain(|u| u.id != user.id);
        }
        self.members[room.index()].push(user);
    }

    pub fn render(&self) -> Vec<Block> {
        let mut blocks = vec![
            Block::section(format!(
                "*Which room would you like to be in?* Asked by {}",
                self.created_by.mention()
            ))
            .with_block_id(self.id.to_string()),
            Block::Divider,
        ];
        blocks.extend(
            Room::ALL
                .into_iter()
                .map(|room| Block::section(room.prompt_line()).with_button("Choose", room.value())),
        );
        blocks.push(Block::Divider);

        if self.is_empty() {
            return blocks;
        }

        blocks.push(Block::section("*Room assignments*"));
        blocks.push(Block::Divider);

        for room in Room::ALL {
            let members = self.members(room);
            if members.is_empty() {
                continue;
            }

            let mut sorted: Vec<&User> = members.iter().collect();
            sorted.sort_by_cached_key(|u| u.name.to_uppercase());
            let names = sorted
                .iter()
                .map(|u| u.mention())
                .collect::<Vec<_>>()
                .join("\n");

            blocks.push(Block::section(room.assignment_title()));
            blocks.push(Block::section(names));
        }

        blocks
    }
}
