//! Field-constraint checks executed before create and update.
//!
//! Each function reports the first violated rule only, in a fixed order, so
//! the client always sees a single deterministic message.

use chrono::{NaiveDate, Utc};

use crate::error::ValidationError;
use crate::film::Film;
use crate::user::User;

const MAX_DESCRIPTION_LENGTH: usize = 200;

fn min_release_date() -> NaiveDate {
    // Première of the first public film screening.
    NaiveDate::from_ymd_opt(1895, 12, 28).unwrap()
}

/// Checks name, description length, release date and duration, in that order.
pub fn validate_film(film: &Film) -> Result<(), ValidationError> {
    if film.name.is_empty() {
        return Err(ValidationError::new("Название не может быть пустым"));
    }
    if let Some(description) = &film.description {
        if description.chars().count() > MAX_DESCRIPTION_LENGTH {
            return Err(ValidationError::new(
                "Максимальная длина описания — 200 символов",
            ));
        }
    }
    if let Some(release_date) = film.release_date {
        if release_date < min_release_date() {
            return Err(ValidationError::new(
                "Дата релиза — не раньше 28 декабря 1895 года",
            ));
        }
    }
    if film.duration <= 0 {
        return Err(ValidationError::new(
            "Продолжительность фильма должна быть положительной",
        ));
    }
    Ok(())
}

/// Checks email, login and birthday, in that order.
pub fn validate_user(user: &User) -> Result<(), ValidationError> {
    if user.email.is_empty() || !user.email.contains('@') {
        return Err(ValidationError::new(
            "Электронная почта не может быть пустой и должна содержать символ @",
        ));
    }
    if user.login.is_empty() || user.login.contains(char::is_whitespace) {
        return Err(ValidationError::new(
            "Логин не может быть пустым и содержать пробелы",
        ));
    }
    if let Some(birthday) = user.birthday {
        if birthday > Utc::now().date_naive() {
            return Err(ValidationError::new(
                "Дата рождения не может быть в будущем",
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn valid_film() -> Film {
        Film {
            id: None,
            name: "Интерстеллар".to_string(),
            description: Some("Космос".to_string()),
            release_date: NaiveDate::from_ymd_opt(2014, 11, 6),
            duration: 10140,
            mpa: None,
            genres: Vec::new(),
        }
    }

    fn valid_user() -> User {
        User {
            id: None,
            email: "user@example.com".to_string(),
            login: "user".to_string(),
            name: String::new(),
            birthday: NaiveDate::from_ymd_opt(1990, 1, 1),
            is_friend: None,
        }
    }

    #[test]
    fn valid_film_passes() {
        assert!(validate_film(&valid_film()).is_ok());
    }

    #[test]
    fn empty_film_name_rejected() {
        let mut film = valid_film();
        film.name = String::new();
        let err = validate_film(&film).unwrap_err();
        assert_eq!(err.message(), "Название не может быть пустым");
    }

    #[test]
    fn over_length_description_rejected() {
        let mut film = valid_film();
        film.description = Some("я".repeat(201));
        let err = validate_film(&film).unwrap_err();
        assert_eq!(err.message(), "Максимальная длина описания — 200 символов");
    }

    #[test]
    fn description_of_exactly_200_chars_allowed() {
        let mut film = valid_film();
        film.description = Some("я".repeat(200));
        assert!(validate_film(&film).is_ok());
    }

    #[test]
    fn release_before_cinema_rejected() {
        let mut film = valid_film();
        film.release_date = NaiveDate::from_ymd_opt(1895, 12, 27);
        let err = validate_film(&film).unwrap_err();
        assert_eq!(err.message(), "Дата релиза — не раньше 28 декабря 1895 года");
    }

    #[test]
    fn release_on_boundary_date_allowed() {
        let mut film = valid_film();
        film.release_date = NaiveDate::from_ymd_opt(1895, 12, 28);
        assert!(validate_film(&film).is_ok());
    }

    #[test]
    fn non_positive_duration_rejected() {
        let mut film = valid_film();
        film.duration = 0;
        let err = validate_film(&film).unwrap_err();
        assert_eq!(
            err.message(),
            "Продолжительность фильма должна быть положительной"
        );
    }

    #[test]
    fn first_failure_wins_for_films() {
        // Both the name and the description are broken; only the name rule,
        // which is checked first, may be reported.
        let mut film = valid_film();
        film.name = String::new();
        film.description = Some("я".repeat(500));
        let err = validate_film(&film).unwrap_err();
        assert_eq!(err.message(), "Название не может быть пустым");
    }

    #[test]
    fn valid_user_passes() {
        assert!(validate_user(&valid_user()).is_ok());
    }

    #[test]
    fn email_without_at_rejected() {
        let mut user = valid_user();
        user.email = "no-at-symbol".to_string();
        let err = validate_user(&user).unwrap_err();
        assert_eq!(
            err.message(),
            "Электронная почта не может быть пустой и должна содержать символ @"
        );
    }

    #[test]
    fn empty_email_rejected() {
        let mut user = valid_user();
        user.email = String::new();
        assert!(validate_user(&user).is_err());
    }

    #[test]
    fn login_with_spaces_rejected() {
        let mut user = valid_user();
        user.login = "two words".to_string();
        let err = validate_user(&user).unwrap_err();
        assert_eq!(err.message(), "Логин не может быть пустым и содержать пробелы");
    }

    #[test]
    fn future_birthday_rejected() {
        let mut user = valid_user();
        user.birthday = Some(Utc::now().date_naive() + Duration::days(1));
        let err = validate_user(&user).unwrap_err();
        assert_eq!(err.message(), "Дата рождения не может быть в будущем");
    }

    #[test]
    fn first_failure_wins_for_users() {
        let mut user = valid_user();
        user.email = "broken".to_string();
        user.login = "also broken".to_string();
        let err = validate_user(&user).unwrap_err();
        assert_eq!(
            err.message(),
            "Электронная почта не может быть пустой и должна содержать символ @"
        );
    }
}
