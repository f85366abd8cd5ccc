mod precaution_dto;

pub use precaution_dto::{
    CreatePrecautionDto, DeletePrecautionsDto, DeletedPrecautionsDto, PrecautionResponseDto,
};
