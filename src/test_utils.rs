#[cfg(test)]
pub mod fixtures {
    use chrono::{DateTime, Duration, Utc};

    use crate::models::domain::{Artist, Category, Drink, Question, RecipePart, Show, Venue};

    pub fn test_categories() -> Vec<Category> {
        vec![
            Category::new(1, "Science"),
            Category::new(2, "Art"),
            Category::new(3, "Geography"),
        ]
    }

    pub fn test_question(id: i64, category: i64) -> Question {
        Question {
            id,
            question: format!("Test question {}", id),
            answer: format!("Answer {}", id),
            category,
            difficulty: 2,
        }
    }

    /// 25 questions spread round-robin over the three test categories.
    pub fn test_questions() -> Vec<Question> {
        (1..=25).map(|id| test_question(id, (id - 1) % 3 + 1)).collect()
    }

    pub fn test_drink(id: i64, title: &str) -> Drink {
        Drink::new(
            id,
            title,
            vec![
                RecipePart::new("brown", "espresso", 1),
                RecipePart::new("white", "milk", 3),
            ],
        )
    }

    pub fn test_venue(id: i64, name: &str, city: &str, state: &str) -> Venue {
        Venue {
            id,
            name: name.to_string(),
            city: city.to_string(),
            state: state.to_string(),
            address: "1 Test Street".to_string(),
            phone: Some("123-123-1234".to_string()),
            genres: vec!["Jazz".to_string()],
            image_link: None,
            facebook_link: None,
            website: None,
            seeking_talent: false,
            seeking_description: None,
        }
    }

    pub fn test_artist(id: i64, name: &str) -> Artist {
        Artist {
            id,
            name: name.to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            phone: None,
            genres: vec!["Rock n Roll".to_string()],
            image_link: Some(format!("https://images.example.com/{}.jpg", id)),
            facebook_link: None,
            website: None,
            seeking_venue: true,
            seeking_description: None,
        }
    }

    pub fn show_in(id: i64, artist_id: i64, venue_id: i64, days: i64) -> Show {
        show_at(id, artist_id, venue_id, Utc::now() + Duration::days(days))
    }

    pub fn show_at(id: i64, artist_id: i64, venue_id: i64, start_time: DateTime<Utc>) -> Show {
        Show::new(id, artist_id, venue_id, start_time)
    }
}

#[cfg(test)]
pub mod tokens {
    use std::sync::Arc;

    use jsonwebtoken::{encode, jwk::JwkSet, Algorithm, EncodingKey, Header};
    use serde::Serialize;

    use crate::auth::{
        Audience, AuthClaims, AuthorizationChecker, JwtService, StaticKeySet,
    };

    pub const TEST_ISSUER: &str = "https://triad-test.us.auth0.com/";
    pub const TEST_AUDIENCE: &str = "drinks";
    pub const TEST_KEY_ID: &str = "test-signing-key";

    pub const JWKS_JSON: &str = include_str!("../tests/fixtures/jwks.json");
    pub const TRUSTED_PRIVATE_KEY: &str = include_str!("../tests/fixtures/trusted_rsa_private.pem");
    pub const UNTRUSTED_PRIVATE_KEY: &str =
        include_str!("../tests/fixtures/untrusted_rsa_private.pem");

    pub fn test_key_set() -> JwkSet {
        serde_json::from_str(JWKS_JSON).expect("fixture JWKS should parse")
    }

    pub fn test_jwt_service() -> JwtService {
        JwtService::new(
            AuthorizationChecker::new(TEST_ISSUER, TEST_AUDIENCE),
            Arc::new(StaticKeySet::new(test_key_set())),
        )
    }

    pub fn test_claims(permissions: &[&str], exp: i64) -> AuthClaims {
        AuthClaims {
            sub: "auth0|test-manager".to_string(),
            iss: TEST_ISSUER.to_string(),
            aud: Audience::One(TEST_AUDIENCE.to_string()),
            exp,
            iat: Some(exp - 3600),
            permissions: Some(permissions.iter().map(|p| p.to_string()).collect()),
        }
    }

    pub fn mint<T: Serialize>(claims: &T) -> String {
        mint_with_key(claims, TRUSTED_PRIVATE_KEY)
    }

    pub fn mint_with_key<T: Serialize>(claims: &T, private_key_pem: &str) -> String {
        let mut header = Header::new(Algorithm::RS256);
        header.kid = Some(TEST_KEY_ID.to_string());

        let key = EncodingKey::from_rsa_pem(private_key_pem.as_bytes())
            .expect("fixture private key should load");
        encode(&header, claims, &key).expect("token should encode")
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::tokens::*;

    #[test]
    fn test_fixture_questions_cover_all_categories() {
        let questions = test_questions();
        assert_eq!(questions.len(), 25);
        for category in test_categories() {
            assert!(questions.iter().any(|q| q.category == category.id));
        }
    }

    #[test]
    fn test_minted_token_carries_key_id() {
        let token = mint(&test_claims(&["get:drinks-detail"], 2_000_000_000));
        let header = jsonwebtoken::decode_header(&token).unwrap();
        assert_eq!(header.kid.as_deref(), Some(TEST_KEY_ID));
    }
}
