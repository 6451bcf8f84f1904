#[derive(Clone, Debug)]
pub(crate) struct Translations {
    pub(crate) by: &'static str,
    pub(crate) album: &'static str,
    pub(crate) listening_to: &'static str,
}

impl Translations {
    pub(crate) fn for_language(language: &str) -> Self {
        match language {
            "de" => Self {
                by: "von",
                album: "Album",
                listening_to: "Hört",
            },
            "fr" => Self {
                by: "par",
                album: "Album",
                listening_to: "Écoute",
            },
            "es" => Self {
                by: "de",
                album: "Álbum",
                listening_to: "Escuchando",
            },
            _ => Self::english(),
        }
    }

    fn english() -> Self {
        Self {
            by: "by",
            album: "Album",
            listening_to: "Listening to",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Translations;

    #[test]
    fn unknown_language_falls_back_to_english() {
        let translations = Translations::for_language("tlh");

        assert_eq!(translations.by, "by");
        assert_eq!(translations.listening_to, "Listening to");
    }

    #[test]
    fn known_language_is_translated() {
        let translations = Translations::for_language("de");

        assert_eq!(translations.by, "von");
    }
}
