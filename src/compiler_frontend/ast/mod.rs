pub mod expression;
mod expression_display;
