//! Labels for the protected page.

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Locale {
    #[default]
    En,
    Es,
}

impl std::str::FromStr for Locale {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" => Ok(Locale::En),
            "es" => Ok(Locale::Es),
            other => Err(format!("unknown locale: {other}")),
        }
    }
}

impl Locale {
    pub fn loading(self) -> &'static str {
        match self {
            Locale::En => "Loading...",
            Locale::Es => "Cargando...",
        }
    }

    pub fn welcome(self, email: &str) -> String {
        match self {
            Locale::En => format!("Welcome, {email}"),
            Locale::Es => format!("Bienvenido, {email}"),
        }
    }

    pub fn id_label(self) -> &'static str {
        "ID:"
    }

    pub fn active_label(self) -> &'static str {
        match self {
            Locale::En => "Active:",
            Locale::Es => "Activo:",
        }
    }

    pub fn yes_no(self, value: bool) -> &'static str {
        match (self, value) {
            (Locale::En, true) => "Yes",
            (Locale::En, false) => "No",
            (Locale::Es, true) => "Sí",
            (Locale::Es, false) => "No",
        }
    }

    pub fn logout(self) -> &'static str {
        match self {
            Locale::En => "Log out",
            Locale::Es => "Cerrar sesión",
        }
    }
}
