//! Category client

use crate::models::{Category, CategoryDraft, CategoryId};

use super::resource::{Form, Resource, ResourceClient};

/// The `/api/categories` collection
#[derive(Debug)]
pub enum Categories {}

impl Resource for Categories {
    const PATH: &'static str = "/api/categories";
    const SINGULAR: &'static str = "category";
    const PLURAL: &'static str = "categories";
    type Id = CategoryId;
    type Record = Category;
    type Draft = CategoryDraft;
}

pub type CategoryClient = ResourceClient<Categories>;

/// Rename payload: `PUT /api/categories/{id}` with body `{name}`
pub type CategoryForm = Form<CategoryId, CategoryDraft>;

impl CategoryForm {
    pub fn rename(id: CategoryId, name: impl Into<String>) -> Self {
        Form::new(id, CategoryDraft::new(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::resource::Operation;

    #[test]
    fn test_category_messages() {
        assert_eq!(
            Operation::Create.error_prefix::<Categories>(),
            "Category creation failed"
        );
        assert_eq!(
            Operation::List.error_prefix::<Categories>(),
            "Failed to fetch categories"
        );
    }

    #[test]
    fn test_rename_form() {
        let form = CategoryForm::rename(CategoryId::new(3), "Groceries");
        assert_eq!(form.id.get(), 3);
        assert_eq!(form.fields.name, "Groceries");
    }
}
