use std::sync::Arc;

use validator::Validate;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::{drink::DrinkShort, Drink, RecipePart},
        dto::request::DrinkRequest,
    },
    repositories::DrinkRepository,
};

pub struct DrinkService {
    repository: Arc<dyn DrinkRepository>,
}

impl DrinkService {
    pub fn new(repository: Arc<dyn DrinkRepository>) -> Self {
        Self { repository }
    }

    pub async fn list_short(&self) -> AppResult<Vec<DrinkShort>> {
        let drinks = self.repository.find_all().await?;
        Ok(drinks.iter().map(Drink::short).collect())
    }

    pub async fn list_long(&self) -> AppResult<Vec<Drink>> {
        let drinks = self.repository.find_all().await?;
        Ok(drinks.iter().map(Drink::long).collect())
    }

    pub async fn create_drink(&self, request: DrinkRequest) -> AppResult<Drink> {
        let (title, recipe) = match (request.title, request.recipe) {
            (Some(title), Some(recipe)) => (title, recipe.into_parts()),
            _ => {
                return Err(AppError::Unprocessable(
                    "title and recipe are required".to_string(),
                ))
            }
        };

        let title = checked_title(&title)?;
        check_recipe(&recipe)?;
        self.ensure_title_free(&title, None).await?;

        let id = self.repository.next_id().await?;
        let drink = self.repository.create(Drink::new(id, &title, recipe)).await?;

        log::info!("Created drink {} '{}'", drink.id, drink.title);
        Ok(drink)
    }

    /// Applies whichever of `title` and `recipe` the request carries.
    pub async fn update_drink(&self, id: i64, request: DrinkRequest) -> AppResult<Drink> {
        let mut drink = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Drink with id '{}' not found", id)))?;

        if let Some(title) = request.title {
            let title = checked_title(&title)?;
            self.ensure_title_free(&title, Some(id)).await?;
            drink.title = title;
        }

        if let Some(recipe) = request.recipe {
            let recipe = recipe.into_parts();
            check_recipe(&recipe)?;
            drink.recipe = recipe;
        }

        let drink = self.repository.update(drink).await?;
        log::info!("Updated drink {}", drink.id);
        Ok(drink)
    }

    pub async fn delete_drink(&self, id: i64) -> AppResult<i64> {
        self.repository.delete(id).await?;
        log::info!("Deleted drink {}", id);
        Ok(id)
    }

    async fn ensure_title_free(&self, title: &str, owner: Option<i64>) -> AppResult<()> {
        match self.repository.find_by_title(title).await? {
            Some(existing) if Some(existing.id) != owner => Err(AppError::AlreadyExists(format!(
                "A drink titled '{}' already exists",
                title
            ))),
            _ => Ok(()),
        }
    }
}

fn checked_title(title: &str) -> AppResult<String> {
    let title = title.trim();
    if title.is_empty() {
        return Err(AppError::Unprocessable("title must not be blank".to_string()));
    }
    Ok(title.to_string())
}

fn check_recipe(recipe: &[RecipePart]) -> AppResult<()> {
    if recipe.is_empty() {
        return Err(AppError::Unprocessable(
            "recipe needs at least one part".to_string(),
        ));
    }
    for part in recipe {
        part.validate()
            .map_err(|e| AppError::Unprocessable(e.to_string()))?;
    }
    Ok(())
}
