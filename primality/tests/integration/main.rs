mod classification;
mod pipeline;
