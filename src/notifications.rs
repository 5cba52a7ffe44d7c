use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationKind {
    Offer,
    Message,
    Scouting,
    System,
}

impl NotificationKind {
    pub fn label(self) -> &'static str {
        match self {
            NotificationKind::Offer => "OFFER",
            NotificationKind::Message => "MSG",
            NotificationKind::Scouting => "SCOUT",
            NotificationKind::System => "SYS",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub id: u64,
    pub kind: NotificationKind,
    pub title: String,
    pub body: String,
    pub created_at: DateTime<Utc>,
    pub read: bool,
}

#[derive(Debug, Clone, Default)]
pub struct NotificationCenter {
    items: Vec<Notification>,
    next_id: u64,
}

impl NotificationCenter {
    pub fn push(&mut self, kind: NotificationKind, title: impl Into<String>, body: impl Into<String>) -> u64 {
        self.next_id += 1;
        let id = self.next_id;
        self.items.push(Notification {
            id,
            kind,
            title: title.into(),
            body: body.into(),
            created_at: Utc::now(),
            read: false,
        });
        id
    }

    /// Newest first.
    pub fn items(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter().rev()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.items.iter().filter(|n| !n.read).count()
    }

    pub fn mark_read(&mut self, id: u64) -> bool {
        match self.items.iter_mut().find(|n| n.id == id) {
            Some(n) => {
                n.read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for n in &mut self.items {
            n.read = true;
        }
    }

    pub fn dismiss(&mut self, id: u64) -> bool {
        let before = self.items.len();
        self.items.retain(|n| n.id != id);
        self.items.len() != before
    }

    /// Id of the notification at `index` in newest-first order.
    pub fn id_at(&self, index: usize) -> Option<u64> {
        self.items().nth(index).map(|n| n.id)
    }

    pub fn seed_demo(&mut self) {
        self.push(
            NotificationKind::Scouting,
            "New highlight reel",
            "Mateo Alvarez uploaded a 4-minute finishing reel",
        );
        self.push(
            NotificationKind::Offer,
            "Counter received",
            "Jordan Ellis countered your offer",
        );
        self.push(
            NotificationKind::Message,
            "Message from academy",
            "Trial dates confirmed for next month",
        );
    }
}
