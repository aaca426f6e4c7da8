//! Example questions users can copy to get started with their data.

/// A canned data-analysis prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExampleQuestion {
    /// Short name shown in listings.
    pub key: &'static str,
    /// The prompt text.
    pub question: &'static str,
}

const EXAMPLE_QUESTIONS: &[ExampleQuestion] = &[
    ExampleQuestion {
        key: "FileOverview",
        question: "Can you provide an overview of the data file, including the number of rows, columns, and data types?",
    },
    ExampleQuestion {
        key: "MissingValues",
        question: "Are there any missing values in the data file? If so, can you provide a summary?",
    },
    ExampleQuestion {
        key: "StatisticalSummary",
        question: "Can you provide a statistical summary of the numeric columns in the data file, including mean, median, and standard deviation?",
    },
    ExampleQuestion {
        key: "CategoricalSummary",
        question: "Can you provide a summary of the categorical columns in the data file, including unique values and their counts?",
    },
    ExampleQuestion {
        key: "Correlations",
        question: "Can you calculate the correlation coefficients between the numeric columns in the data file?",
    },
    ExampleQuestion {
        key: "Outliers",
        question: "Are there any outliers in the numeric columns of the data file? If so, can you provide details on their counts and positions?",
    },
    ExampleQuestion {
        key: "Normalization",
        question: "Do any columns in the data file require normalization or scaling? If so, which method would you recommend and why?",
    },
    ExampleQuestion {
        key: "FeatureSelection",
        question: "Which features in the data file seem to be the most important or relevant for analysis? Can you provide a ranking or explanation?",
    },
    ExampleQuestion {
        key: "DataVisualizations",
        question: "What types of data visualizations would be most useful for understanding the patterns and trends in the data file?",
    },
    ExampleQuestion {
        key: "TimeSeriesAnalysis",
        question: "Is there a time-based component to the data file? If so, can you provide insights on trends, seasonality, or cyclical patterns?",
    },
    ExampleQuestion {
        key: "Clustering",
        question: "Can you suggest any clustering techniques that might be useful for grouping similar records in the data file?",
    },
    ExampleQuestion {
        key: "PredictiveModels",
        question: "What predictive modeling techniques would be appropriate for the data file, given its features and the problem you want to solve?",
    },
    ExampleQuestion {
        key: "ModelEvaluation",
        question: "How would you evaluate the performance of the predictive models trained on the data file?",
    },
    ExampleQuestion {
        key: "DataCleaning",
        question: "Are there any data quality issues or inconsistencies in the data file that need to be addressed before analysis?",
    },
    ExampleQuestion {
        key: "DataTransformation",
        question: "Do any columns in the data file require transformation, such as encoding categorical variables or applying mathematical transformations?",
    },
];

/// All example questions in display order.
pub fn example_questions() -> &'static [ExampleQuestion] {
    EXAMPLE_QUESTIONS
}

/// Looks up an example by key, ignoring ASCII case.
pub fn find_example(key: &str) -> Option<&'static ExampleQuestion> {
    EXAMPLE_QUESTIONS
        .iter()
        .find(|example| example.key.eq_ignore_ascii_case(key.trim()))
}
