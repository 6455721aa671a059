// src/bin/dashboard/forms.rs - Login and feedback form state
use safety_cockpit::feedback::{FeedbackRecord, Rating};
use safety_cockpit::roles::Role;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LoginField {
    Username,
    Password,
    Role,
}

#[derive(Debug, Clone)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub role: Role,
    pub focus: LoginField,
    pub error: Option<String>,
}

impl LoginForm {
    pub fn new() -> Self {
        Self {
            username: String::new(),
            password: String::new(),
            role: Role::default(),
            focus: LoginField::Username,
            error: None,
        }
    }

    pub fn next_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Role,
            LoginField::Role => LoginField::Username,
        };
    }

    pub fn previous_field(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Role,
            LoginField::Password => LoginField::Username,
            LoginField::Role => LoginField::Password,
        };
    }

    pub fn input(&mut self, c: char) {
        match self.focus {
            LoginField::Username => self.username.push(c),
            LoginField::Password => self.password.push(c),
            LoginField::Role => {}
        }
    }

    pub fn backspace(&mut self) {
        match self.focus {
            LoginField::Username => {
                self.username.pop();
            }
            LoginField::Password => {
                self.password.pop();
            }
            LoginField::Role => {}
        }
    }

    pub fn cycle_role(&mut self, forward: bool) {
        if self.focus == LoginField::Role {
            self.role = if forward { self.role.next() } else { self.role.previous() };
        }
    }

    pub fn masked_password(&self) -> String {
        "•".repeat(self.password.chars().count())
    }

    /// Keeps the username and role, drops the password.
    pub fn reset_after_logout(&mut self) {
        self.password.clear();
        self.focus = LoginField::Password;
        self.error = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FeedbackField {
    HappinessUsage,
    Usability,
    HappinessMethods,
    Comments,
}

impl FeedbackField {
    pub const ALL: [FeedbackField; 4] = [
        FeedbackField::HappinessUsage,
        FeedbackField::Usability,
        FeedbackField::HappinessMethods,
        FeedbackField::Comments,
    ];

    pub fn question(&self) -> &'static str {
        match self {
            FeedbackField::HappinessUsage => "How satisfied were you using this dashboard?",
            FeedbackField::Usability => "How would you rate the dashboard's usability?",
            FeedbackField::HappinessMethods => "How satisfied were you with the suggested methods?",
            FeedbackField::Comments => "Anything else you would like to tell us?",
        }
    }

    pub fn hint(&self) -> &'static str {
        match self {
            FeedbackField::HappinessUsage => "1 = not at all satisfied, 5 = very satisfied",
            FeedbackField::Usability => "1 = very hard to use, 5 = very easy to use",
            FeedbackField::HappinessMethods => "1 = not at all satisfied, 5 = very satisfied",
            FeedbackField::Comments => "Type your feedback here...",
        }
    }
}

#[derive(Debug, Clone)]
pub struct FeedbackForm {
    pub happiness_usage: Rating,
    pub usability: Rating,
    pub happiness_methods: Rating,
    pub comments: String,
    pub focus: FeedbackField,
    pub error: Option<String>,
}

impl FeedbackForm {
    pub fn new() -> Self {
        Self {
            happiness_usage: Rating::default(),
            usability: Rating::default(),
            happiness_methods: Rating::default(),
            comments: String::new(),
            focus: FeedbackField::HappinessUsage,
            error: None,
        }
    }

    pub fn rating(&self, field: FeedbackField) -> Option<Rating> {
        match field {
            FeedbackField::HappinessUsage => Some(self.happiness_usage),
            FeedbackField::Usability => Some(self.usability),
            FeedbackField::HappinessMethods => Some(self.happiness_methods),
            FeedbackField::Comments => None,
        }
    }

    fn rating_mut(&mut self) -> Option<&mut Rating> {
        match self.focus {
            FeedbackField::HappinessUsage => Some(&mut self.happiness_usage),
            FeedbackField::Usability => Some(&mut self.usability),
            FeedbackField::HappinessMethods => Some(&mut self.happiness_methods),
            FeedbackField::Comments => None,
        }
    }

    pub fn next_field(&mut self) {
        let idx = FeedbackField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = FeedbackField::ALL[(idx + 1) % FeedbackField::ALL.len()];
    }

    pub fn previous_field(&mut self) {
        let idx = FeedbackField::ALL.iter().position(|f| *f == self.focus).unwrap_or(0);
        self.focus = FeedbackField::ALL[(idx + FeedbackField::ALL.len() - 1) % FeedbackField::ALL.len()];
    }

    pub fn increase(&mut self) {
        if let Some(rating) = self.rating_mut() {
            *rating = rating.increment();
        }
    }

    pub fn decrease(&mut self) {
        if let Some(rating) = self.rating_mut() {
            *rating = rating.decrement();
        }
    }

    pub fn input(&mut self, c: char) {
        if self.focus == FeedbackField::Comments {
            self.comments.push(c);
        }
    }

    pub fn backspace(&mut self) {
        if self.focus == FeedbackField::Comments {
            self.comments.pop();
        }
    }

    pub fn to_record(&self) -> FeedbackRecord {
        FeedbackRecord::new(
            self.happiness_usage,
            self.usability,
            self.happiness_methods,
            self.comments.trim(),
        )
    }
}
