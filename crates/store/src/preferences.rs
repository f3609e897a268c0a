/// Settings-page toggles. Kept in memory for the lifetime of the process.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Preferences {
    pub dark_mode: bool,
    pub notifications: bool,
    pub bill_reminders: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            dark_mode: false,
            notifications: true,
            bill_reminders: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Toggle {
    DarkMode,
    Notifications,
    BillReminders,
}

impl Toggle {
    pub const ALL: [Toggle; 3] = [Self::DarkMode, Self::Notifications, Self::BillReminders];

    pub fn label(self) -> &'static str {
        match self {
            Self::DarkMode => "Dark Mode",
            Self::Notifications => "Notifications",
            Self::BillReminders => "Bill Reminders",
        }
    }

    pub fn hint(self) -> &'static str {
        match self {
            Self::DarkMode => "Toggle between light and dark theme",
            Self::Notifications => "Enable or disable notifications",
            Self::BillReminders => "Get reminded before bills are due",
        }
    }
}

impl Preferences {
    pub fn get(&self, toggle: Toggle) -> bool {
        match toggle {
            Toggle::DarkMode => self.dark_mode,
            Toggle::Notifications => self.notifications,
            Toggle::BillReminders => self.bill_reminders,
        }
    }

    /// Flips one toggle and returns its new value.
    pub fn toggle(&mut self, toggle: Toggle) -> bool {
        let slot = match toggle {
            Toggle::DarkMode => &mut self.dark_mode,
            Toggle::Notifications => &mut self.notifications,
            Toggle::BillReminders => &mut self.bill_reminders,
        };
        *slot = !*slot;
        *slot
    }
}
