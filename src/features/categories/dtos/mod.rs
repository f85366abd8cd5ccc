mod category_dto;

pub use category_dto::{
    AddCategoryDto, BulkDeleteCategoriesDto, CategoriesDeletedDto, CategoryAddedDto,
    CategoryListQuery,
};
