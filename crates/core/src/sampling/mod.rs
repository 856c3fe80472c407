pub mod average_color;
