mod common;
mod estimator;
mod routing;
