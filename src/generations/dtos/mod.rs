pub mod generate_images_dto;
