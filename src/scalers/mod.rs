mod min_max_scaler;

pub use min_max_scaler::MinMaxScaler;
